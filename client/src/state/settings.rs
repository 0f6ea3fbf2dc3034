#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use std::fmt;
use std::str::FromStr;

use crate::config::DEFAULT_MODEL;

pub const DEFAULT_DEVELOPER_MESSAGE: &str = "You are a helpful assistant.";

const CONCISE_PROMPT: &str = "You are a concise assistant. Answer the user's question about the PDF in \
     two or three sentences using only the provided context. If the context does not contain the answer, say so.";

const DETAILED_PROMPT: &str = "You are a thorough assistant. Answer the user's question about the PDF in \
     detail, quoting the relevant passages from the provided context and explaining how they support the answer.";

/// Mode toggle for document questions. Each mode maps to a fixed system prompt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatMode {
    /// No system prompt; the server's default instruction applies.
    #[default]
    Standard,
    Concise,
    Detailed,
}

impl ChatMode {
    pub const ALL: [Self; 3] = [Self::Standard, Self::Concise, Self::Detailed];

    #[must_use]
    pub fn system_prompt(self) -> Option<&'static str> {
        match self {
            Self::Standard => None,
            Self::Concise => Some(CONCISE_PROMPT),
            Self::Detailed => Some(DETAILED_PROMPT),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Concise => "concise",
            Self::Detailed => "detailed",
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode '{0}' (expected standard, concise or detailed)")]
pub struct UnknownMode(pub String);

impl FromStr for ChatMode {
    type Err = UnknownMode;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownMode(raw.to_owned()))
    }
}

/// Settings panel state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub mode: ChatMode,
    /// System-role instruction sent with streaming chat.
    pub developer_message: String,
    pub model: String,
    /// Route plain questions through the streaming chat endpoint.
    pub streaming: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: ChatMode::Standard,
            developer_message: DEFAULT_DEVELOPER_MESSAGE.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            streaming: false,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
