#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// State for the document upload area.
///
/// A session identifier exists only after a successful upload and is the
/// handle every document question is sent with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub session_id: Option<String>,
    pub file_name: Option<String>,
    pub uploading: bool,
    pub error: Option<String>,
}

impl SessionState {
    /// Enter the uploading state, dropping any previous session.
    pub fn begin_upload(&mut self, file_name: &str) {
        self.session_id = None;
        self.file_name = Some(file_name.to_owned());
        self.error = None;
        self.uploading = true;
    }

    pub fn complete_upload(&mut self, session_id: String) {
        self.session_id = Some(session_id);
        self.uploading = false;
    }

    pub fn fail_upload(&mut self, message: String) {
        self.session_id = None;
        self.file_name = None;
        self.error = Some(message);
        self.uploading = false;
    }

    /// Reattach to a session created earlier, for example by another process.
    pub fn resume(&mut self, session_id: String) {
        self.session_id = Some(session_id);
        self.file_name = None;
        self.error = None;
        self.uploading = false;
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.session_id.is_some()
    }
}
