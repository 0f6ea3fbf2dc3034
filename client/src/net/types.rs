//! Wire DTOs for the chat API and the transport error type.
//!
//! Field names match the JSON bodies the server expects, so these structs
//! serialize directly with `reqwest`'s `json` support.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::path::Path;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by chat API calls.
///
/// `Display` renders only the underlying message; the application layer adds
/// the `"Upload failed: "` / `"Chat failed: "` prefix.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("{0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("{}", status_message(*status, body))]
    Status { status: u16, body: String },

    /// A JSON response body could not be deserialized.
    #[error("invalid response: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

fn status_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() { format!("HTTP {status}") } else { body.to_owned() }
}

// =============================================================================
// UPLOAD
// =============================================================================

/// A document picked for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }

    /// Whether `path` passes the picker filter (a `.pdf` extension, any case).
    #[must_use]
    pub fn accepts(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }

    /// Read a PDF from disk.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the path fails the picker filter, or the
    /// underlying I/O error when the file cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        if !Self::accepts(path) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a .pdf file", path.display()),
            ));
        }
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "document.pdf".to_owned(), |name| name.to_string_lossy().into_owned());
        Ok(Self { file_name, bytes })
    }
}

/// Response from `POST /api/upload_pdf`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub session_id: String,
}

// =============================================================================
// CHAT
// =============================================================================

/// Body for `POST /api/chat_pdf`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPdfRequest {
    pub session_id: String,
    pub user_message: String,
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

/// Response from `POST /api/chat_pdf`.
///
/// The model may return no content, in which case `answer` is `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPdfResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

/// Body for the streaming `POST /api/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub developer_message: String,
    pub user_message: String,
    pub api_key: String,
    pub model: String,
}

/// Response from `GET /api/health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
