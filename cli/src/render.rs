//! Plain-text rendering of client state for the terminal.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use pdfchat_client::Controls;
use pdfchat_client::state::chat::{ChatMessage, ChatState, Role};
use pdfchat_client::state::session::SessionState;
use pdfchat_client::state::settings::{ChatMode, Settings};

pub const HELP: &str = "\
Commands:
  /key [secret]      set the API key (kept in memory only); no argument forgets it
  /upload <path>     upload a PDF and start a new session
  /ask <question>    ask about the uploaded PDF
  /send <message>    stream a reply from the chat endpoint
  /mode <mode>       standard | concise | detailed
  /model <name>      model for streamed chat
  /dev <text>        developer message for streamed chat
  /stream on|off     route plain lines to streamed chat
  /settings          show current settings
  /history           show the message log
  /clear             clear the message log
  /health            check the server
  /help              show this help
  /quit              exit
Any other line is a question (streamed when /stream is on).";

/// Actions a user can trigger, for disabled-control messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Upload,
    Ask,
    Send,
}

#[must_use]
pub fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "assistant",
    }
}

#[must_use]
pub fn message(message: &ChatMessage) -> String {
    format!("{}> {}", speaker(message.role), message.content)
}

#[must_use]
pub fn history(chat: &ChatState) -> String {
    if chat.messages.is_empty() {
        return "(no messages)".to_owned();
    }
    chat.messages.iter().map(message).collect::<Vec<_>>().join("\n")
}

#[must_use]
pub fn settings(settings: &Settings) -> String {
    format!(
        "mode:      {}\nmodel:     {}\ndeveloper: {}\nstreaming: {}",
        settings.mode,
        settings.model,
        settings.developer_message,
        if settings.streaming { "on" } else { "off" },
    )
}

#[must_use]
pub fn mode_changed(mode: ChatMode) -> String {
    match mode.system_prompt() {
        Some(prompt) => format!("mode: {mode} (system prompt: {prompt})"),
        None => format!("mode: {mode} (server default prompt)"),
    }
}

#[must_use]
pub fn session(session: &SessionState) -> String {
    match (&session.session_id, &session.file_name) {
        (Some(id), Some(file)) => format!("PDF uploaded! You can now ask questions. ({file}, session {id})"),
        (Some(id), None) => format!("session {id}"),
        (None, _) => session
            .error
            .clone()
            .unwrap_or_else(|| "no PDF uploaded".to_owned()),
    }
}

/// Explain why `action` is disabled, or `None` when it is enabled.
#[must_use]
pub fn disabled_reason(action: Action, controls: Controls, has_key: bool, session: &SessionState) -> Option<&'static str> {
    let enabled = match action {
        Action::Upload => controls.upload,
        Action::Ask => controls.ask,
        Action::Send => controls.send,
    };
    if enabled {
        return None;
    }
    if !has_key {
        return Some("enter an API key first: /key <secret>");
    }
    match action {
        Action::Upload => Some("an upload is already in progress"),
        Action::Ask if !session.is_ready() => Some("upload a PDF first: /upload <path>"),
        Action::Ask | Action::Send => Some("a chat request is already in progress"),
    }
}
