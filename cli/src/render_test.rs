use super::*;

fn msg(role: Role, content: &str) -> ChatMessage {
    ChatMessage { id: "m".to_owned(), role, content: content.to_owned(), timestamp: 0.0 }
}

// =============================================================
// Messages
// =============================================================

#[test]
fn message_is_prefixed_with_speaker() {
    assert_eq!(message(&msg(Role::User, "hi")), "you> hi");
    assert_eq!(message(&msg(Role::Assistant, "hello")), "assistant> hello");
}

#[test]
fn history_lists_messages_in_order() {
    let mut chat = ChatState::default();
    chat.messages.push(msg(Role::User, "q"));
    chat.messages.push(msg(Role::Assistant, "a"));
    assert_eq!(history(&chat), "you> q\nassistant> a");
}

#[test]
fn empty_history_has_placeholder() {
    assert_eq!(history(&ChatState::default()), "(no messages)");
}

// =============================================================
// Settings and session
// =============================================================

#[test]
fn settings_render_every_field() {
    let rendered = settings(&Settings::default());
    assert!(rendered.contains("mode:      standard"));
    assert!(rendered.contains("model:     gpt-4.1-mini"));
    assert!(rendered.contains("developer: You are a helpful assistant."));
    assert!(rendered.ends_with("streaming: off"));
}

#[test]
fn standard_mode_mentions_server_default() {
    assert_eq!(mode_changed(ChatMode::Standard), "mode: standard (server default prompt)");
    assert!(mode_changed(ChatMode::Concise).starts_with("mode: concise (system prompt: "));
}

#[test]
fn session_shows_error_when_upload_failed() {
    let state = SessionState { error: Some("Upload failed: nope".to_owned()), ..SessionState::default() };
    assert_eq!(session(&state), "Upload failed: nope");
    assert_eq!(session(&SessionState::default()), "no PDF uploaded");
}

#[test]
fn session_shows_file_and_id_after_upload() {
    let mut state = SessionState::default();
    state.begin_upload("a.pdf");
    state.complete_upload("s1".to_owned());
    assert_eq!(session(&state), "PDF uploaded! You can now ask questions. (a.pdf, session s1)");
}

// =============================================================
// Disabled controls
// =============================================================

#[test]
fn missing_key_is_reported_first() {
    let reason = disabled_reason(Action::Ask, Controls::default(), false, &SessionState::default());
    assert_eq!(reason, Some("enter an API key first: /key <secret>"));
}

#[test]
fn ask_without_session_asks_for_upload() {
    let controls = Controls { upload: true, ask: false, send: true };
    let reason = disabled_reason(Action::Ask, controls, true, &SessionState::default());
    assert_eq!(reason, Some("upload a PDF first: /upload <path>"));
}

#[test]
fn enabled_action_has_no_reason() {
    let controls = Controls { upload: true, ask: false, send: true };
    assert_eq!(disabled_reason(Action::Send, controls, true, &SessionState::default()), None);
    assert_eq!(disabled_reason(Action::Upload, controls, true, &SessionState::default()), None);
}
