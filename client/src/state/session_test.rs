use super::*;

// =============================================================
// SessionState transitions
// =============================================================

#[test]
fn default_has_no_session() {
    let state = SessionState::default();
    assert!(!state.is_ready());
    assert!(!state.uploading);
    assert!(state.error.is_none());
}

#[test]
fn begin_upload_drops_previous_session_and_error() {
    let mut state = SessionState {
        session_id: Some("old".to_owned()),
        file_name: Some("old.pdf".to_owned()),
        uploading: false,
        error: Some("Upload failed: boom".to_owned()),
    };
    state.begin_upload("new.pdf");
    assert!(state.session_id.is_none());
    assert_eq!(state.file_name.as_deref(), Some("new.pdf"));
    assert!(state.error.is_none());
    assert!(state.uploading);
}

#[test]
fn complete_upload_sets_session() {
    let mut state = SessionState::default();
    state.begin_upload("a.pdf");
    state.complete_upload("s-1".to_owned());
    assert_eq!(state.session_id.as_deref(), Some("s-1"));
    assert!(!state.uploading);
    assert!(state.is_ready());
}

#[test]
fn fail_upload_records_error_without_session() {
    let mut state = SessionState::default();
    state.begin_upload("a.pdf");
    state.fail_upload("Upload failed: bad file".to_owned());
    assert!(!state.is_ready());
    assert!(state.file_name.is_none());
    assert!(!state.uploading);
    assert_eq!(state.error.as_deref(), Some("Upload failed: bad file"));
}

#[test]
fn resume_attaches_existing_session() {
    let mut state = SessionState { error: Some("Upload failed: x".to_owned()), ..SessionState::default() };
    state.resume("s-9".to_owned());
    assert_eq!(state.session_id.as_deref(), Some("s-9"));
    assert!(state.error.is_none());
    assert!(state.is_ready());
}
