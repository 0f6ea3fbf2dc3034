//! REST client for the chat API.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. A non-2xx status is surfaced as
//! [`ApiError::Status`] carrying the response body text, which is what the
//! application layer shows the user.

use std::pin::Pin;

use futures_util::stream::{self, BoxStream};
use futures_util::{Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::decode::Utf8StreamDecoder;
use super::types::{
    ApiError, ChatPdfRequest, ChatPdfResponse, ChatRequest, HealthResponse, PdfUpload, UploadResponse,
};
use crate::config::{ClientConfig, Timeouts};

/// Decoded text chunks of a streaming chat answer, in arrival order.
pub type TextStream = BoxStream<'static, Result<String, ApiError>>;

// =============================================================================
// BACKEND TRAIT
// =============================================================================

/// The chat API as seen by the application controller. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Upload a PDF and return the new session identifier.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the server rejects it.
    async fn upload_pdf(&self, upload: &PdfUpload, api_key: &str) -> Result<String, ApiError>;

    /// Ask a question about an uploaded document and return the answer.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the server rejects it.
    async fn chat_pdf(&self, request: &ChatPdfRequest) -> Result<String, ApiError>;

    /// Start a streaming chat and return the decoded text chunks.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails before streaming begins.
    /// Failures while reading the body arrive as `Err` items in the stream.
    async fn chat_stream(&self, request: &ChatRequest) -> Result<TextStream, ApiError>;

    /// Query the server health endpoint and return its status string.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the server rejects it.
    async fn health(&self) -> Result<String, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeouts: Timeouts,
}

impl ApiClient {
    /// Build a client for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the `reqwest` client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_owned(), timeouts: config.timeouts })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        debug!(path, "POST");
        let response = self
            .http
            .post(self.url(path))
            .timeout(self.timeouts.request())
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        read_json(path, response).await
    }
}

async fn ensure_success(path: &str, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(path, status = status.as_u16(), "chat API returned error status");
    Err(ApiError::Status { status: status.as_u16(), body })
}

async fn read_json<R: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<R, ApiError> {
    let response = ensure_success(path, response).await?;
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait::async_trait]
impl ChatBackend for ApiClient {
    async fn upload_pdf(&self, upload: &PdfUpload, api_key: &str) -> Result<String, ApiError> {
        let path = "/api/upload_pdf";
        let file = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str("application/pdf")
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let form = Form::new()
            .part("file", file)
            .text("api_key", api_key.to_owned());

        debug!(path, file = %upload.file_name, bytes = upload.bytes.len(), "POST multipart");
        let response = self
            .http
            .post(self.url(path))
            .timeout(self.timeouts.request())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let body: UploadResponse = read_json(path, response).await?;
        Ok(body.session_id)
    }

    async fn chat_pdf(&self, request: &ChatPdfRequest) -> Result<String, ApiError> {
        let body: ChatPdfResponse = self.post_json("/api/chat_pdf", request).await?;
        Ok(body.answer.unwrap_or_default())
    }

    async fn chat_stream(&self, request: &ChatRequest) -> Result<TextStream, ApiError> {
        let path = "/api/chat";
        debug!(path, model = %request.model, "POST streaming");
        // No whole-request timeout: a long generation must not be cut off mid-stream.
        let response = self
            .http
            .post(self.url(path))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let response = ensure_success(path, response).await?;
        Ok(decode_text_stream(response.bytes_stream()))
    }

    async fn health(&self) -> Result<String, ApiError> {
        let path = "/api/health";
        debug!(path, "GET");
        let response = self
            .http
            .get(self.url(path))
            .timeout(self.timeouts.request())
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let body: HealthResponse = read_json(path, response).await?;
        Ok(body.status)
    }
}

// =============================================================================
// STREAM DECODING
// =============================================================================

struct DecodeState<S> {
    body: Pin<Box<S>>,
    decoder: Utf8StreamDecoder,
    done: bool,
}

/// Turn a raw byte stream into non-empty decoded text chunks.
///
/// The stream ends after the body ends or after the first read error.
pub fn decode_text_stream<S, B, E>(body: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let state = DecodeState { body: Box::pin(body), decoder: Utf8StreamDecoder::new(), done: false };
    stream::unfold(state, |mut state| async move {
        if state.done {
            return None;
        }
        loop {
            match state.body.next().await {
                Some(Ok(bytes)) => {
                    let text = state.decoder.push(bytes.as_ref());
                    if !text.is_empty() {
                        return Some((Ok(text), state));
                    }
                }
                Some(Err(error)) => {
                    state.done = true;
                    return Some((Err(ApiError::Request(error.to_string())), state));
                }
                None => {
                    state.done = true;
                    if state.decoder.has_pending() {
                        warn!("stream ended inside a UTF-8 sequence");
                    }
                    let tail = state.decoder.finish();
                    if tail.is_empty() {
                        return None;
                    }
                    return Some((Ok(tail), state));
                }
            }
        }
    })
    .boxed()
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
