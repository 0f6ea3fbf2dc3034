use super::*;

// =============================================================
// ChatState defaults
// =============================================================

#[test]
fn chat_state_default_empty() {
    let state = ChatState::default();
    assert!(state.messages.is_empty());
    assert!(state.answer.is_none());
    assert!(state.error.is_none());
    assert!(!state.loading);
    assert!(!state.is_streaming());
}

// =============================================================
// Appending
// =============================================================

#[test]
fn messages_keep_insertion_order_and_unique_ids() {
    let mut state = ChatState::default();
    state.push_user("first");
    state.push_assistant("second");
    state.push_user("third");

    let roles: Vec<Role> = state.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
    assert_ne!(state.messages[0].id, state.messages[1].id);
    assert!(state.messages[0].timestamp > 0.0);
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    assert_eq!(Role::User.as_str(), "user");
}

// =============================================================
// Streaming
// =============================================================

#[test]
fn chunks_accumulate_into_streaming_message() {
    let mut state = ChatState::default();
    state.push_user("hi");
    let id = state.begin_stream();
    let chunks = ["Hel", "lo", ", ", "there"];
    for chunk in chunks {
        assert!(state.append_chunk(chunk));
    }
    assert_eq!(state.streaming_message().map(|m| m.id.clone()), Some(id));
    state.finish_stream(false);

    assert!(!state.is_streaming());
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[1].role, Role::Assistant);
    assert_eq!(state.messages[1].content, chunks.concat());
}

#[test]
fn finish_stream_removes_empty_placeholder_on_request() {
    let mut state = ChatState::default();
    state.push_user("hi");
    state.begin_stream();
    state.finish_stream(true);
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].role, Role::User);
}

#[test]
fn finish_stream_keeps_empty_reply_otherwise() {
    let mut state = ChatState::default();
    state.push_user("hi");
    state.begin_stream();
    state.finish_stream(false);

    assert!(!state.is_streaming());
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[1].role, Role::Assistant);
    assert_eq!(state.messages[1].content, "");
}

#[test]
fn append_without_stream_is_dropped() {
    let mut state = ChatState::default();
    assert!(!state.append_chunk("orphan"));
    assert!(state.messages.is_empty());
}

#[test]
fn clear_mid_stream_drops_later_chunks() {
    let mut state = ChatState::default();
    state.begin_stream();
    state.append_chunk("a");
    state.clear();
    assert!(!state.append_chunk("b"));
    assert!(state.messages.is_empty());
}

// =============================================================
// Clearing
// =============================================================

#[test]
fn clear_empties_log_answer_and_error() {
    let mut state = ChatState::default();
    state.push_user("q");
    state.push_assistant("a");
    state.answer = Some("a".to_owned());
    state.error = Some("Chat failed: x".to_owned());

    state.clear();

    assert!(state.messages.is_empty());
    assert!(state.answer.is_none());
    assert!(state.error.is_none());
}
