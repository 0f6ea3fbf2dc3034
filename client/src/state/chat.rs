#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// State for the chat panel.
///
/// `messages` is append-only until [`ChatState::clear`]. `answer` is the most
/// recent whole answer from the document endpoint, shown on its own.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub answer: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
    streaming: Option<String>,
}

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: f64,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), role, content: content.into(), timestamp: now_ms() }
    }
}

impl ChatState {
    pub fn push_user(&mut self, content: &str) -> &ChatMessage {
        self.push(ChatMessage::new(Role::User, content))
    }

    pub fn push_assistant(&mut self, content: &str) -> &ChatMessage {
        self.push(ChatMessage::new(Role::Assistant, content))
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        let last = self.messages.len() - 1;
        &self.messages[last]
    }

    /// Append an empty assistant message that streamed chunks will fill.
    /// Returns its id.
    pub fn begin_stream(&mut self) -> String {
        let message = ChatMessage::new(Role::Assistant, "");
        let id = message.id.clone();
        self.messages.push(message);
        self.streaming = Some(id.clone());
        id
    }

    /// Append `chunk` to the in-progress assistant message.
    ///
    /// Returns `false` when no stream is in progress (for example after the
    /// log was cleared mid-stream); the chunk is dropped.
    pub fn append_chunk(&mut self, chunk: &str) -> bool {
        let Some(id) = self.streaming.as_deref() else {
            return false;
        };
        match self.messages.iter_mut().rev().find(|m| m.id == id) {
            Some(message) => {
                message.content.push_str(chunk);
                true
            }
            None => false,
        }
    }

    /// Close the in-progress message. With `drop_if_empty` set, an assistant
    /// message that never received any text is removed; otherwise it stays,
    /// so a successful empty reply still shows up in the log.
    pub fn finish_stream(&mut self, drop_if_empty: bool) {
        let Some(id) = self.streaming.take() else {
            return;
        };
        if drop_if_empty {
            self.messages.retain(|m| m.id != id || !m.content.is_empty());
        }
    }

    #[cfg(test)]
    pub(crate) fn streaming_message(&self) -> Option<&ChatMessage> {
        let id = self.streaming.as_deref()?;
        self.messages.iter().rev().find(|m| m.id == id)
    }

    #[cfg(test)]
    pub(crate) fn is_streaming(&self) -> bool {
        self.streaming.is_some()
    }

    /// Empty the log and any displayed answer or error.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.answer = None;
        self.error = None;
        self.streaming = None;
    }
}

fn now_ms() -> f64 {
    let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0.0;
    };
    duration.as_secs_f64() * 1000.0
}
