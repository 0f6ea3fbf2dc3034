//! Application controller: credential, session, chat and settings state plus
//! the handlers that move it.
//!
//! DESIGN
//! ======
//! `ChatApp` owns all UI state and talks to the API only through
//! [`ChatBackend`], so surfaces (the terminal REPL, one-shot commands) and
//! tests drive identical logic. Handlers take `&mut self`; a surface issues
//! one request at a time.
//!
//! ERROR HANDLING
//! ==============
//! Handler failures never propagate. They are stored as user-facing strings
//! (`"Upload failed: …"`, `"Chat failed: …"`) and reported as
//! [`Outcome::Failed`], after the matching loading flag is reset.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use futures_util::StreamExt;
use tracing::{debug, info, warn};

use crate::net::api::ChatBackend;
use crate::net::types::{ApiError, ChatPdfRequest, ChatRequest, PdfUpload};
use crate::state::chat::ChatState;
use crate::state::credentials::ApiKey;
use crate::state::session::SessionState;
use crate::state::settings::Settings;

/// Result of invoking a handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Preconditions were not met (the control is disabled); nothing was sent.
    Skipped,
    Succeeded,
    /// The request failed; the error string is stored in state.
    Failed,
}

/// Which actions are currently enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub upload: bool,
    /// Document question via `/api/chat_pdf`.
    pub ask: bool,
    /// Streaming chat via `/api/chat`.
    pub send: bool,
}

pub struct ChatApp<B> {
    backend: B,
    api_key: ApiKey,
    pub session: SessionState,
    pub chat: ChatState,
    pub settings: Settings,
}

impl<B: ChatBackend> ChatApp<B> {
    #[must_use]
    pub fn new(backend: B, settings: Settings) -> Self {
        Self {
            backend,
            api_key: ApiKey::default(),
            session: SessionState::default(),
            chat: ChatState::default(),
            settings,
        }
    }

    pub fn set_api_key(&mut self, key: impl Into<ApiKey>) {
        self.api_key = key.into();
    }

    /// Forget the credential; every control becomes disabled.
    pub fn clear_api_key(&mut self) {
        self.api_key.clear();
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_present()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn controls(&self) -> Controls {
        let keyed = self.api_key.is_present();
        Controls {
            upload: keyed && !self.session.uploading,
            ask: keyed && self.session.is_ready() && !self.chat.loading,
            send: keyed && !self.chat.loading,
        }
    }

    /// Upload a document and start a new session.
    ///
    /// Any existing session, message history, answer and errors are cleared
    /// before the request is sent.
    pub async fn upload(&mut self, upload: &PdfUpload) -> Outcome {
        if !self.controls().upload {
            return Outcome::Skipped;
        }
        self.session.begin_upload(&upload.file_name);
        self.chat.clear();

        match self.backend.upload_pdf(upload, self.api_key.expose()).await {
            Ok(session_id) => {
                info!(%session_id, file = %upload.file_name, "document session created");
                self.session.complete_upload(session_id);
                Outcome::Succeeded
            }
            Err(error) => {
                warn!(%error, file = %upload.file_name, "upload failed");
                self.session.fail_upload(upload_failed(&error));
                Outcome::Failed
            }
        }
    }

    /// Ask a question about the uploaded document.
    ///
    /// The system prompt comes from the current [`Settings::mode`].
    pub async fn ask(&mut self, question: &str) -> Outcome {
        let question = question.trim();
        if question.is_empty() || !self.controls().ask {
            return Outcome::Skipped;
        }
        let Some(session_id) = self.session.session_id.clone() else {
            return Outcome::Skipped;
        };

        self.chat.answer = None;
        self.chat.error = None;
        self.chat.loading = true;
        self.chat.push_user(question);

        let request = ChatPdfRequest {
            session_id,
            user_message: question.to_owned(),
            api_key: self.api_key.expose().to_owned(),
            system_prompt: self.settings.mode.system_prompt().map(str::to_owned),
        };
        debug!(mode = %self.settings.mode, "asking document question");
        let outcome = match self.backend.chat_pdf(&request).await {
            Ok(answer) => {
                self.chat.push_assistant(&answer);
                self.chat.answer = Some(answer);
                Outcome::Succeeded
            }
            Err(error) => {
                warn!(%error, "document question failed");
                self.chat.error = Some(chat_failed(&error));
                Outcome::Failed
            }
        };
        self.chat.loading = false;
        outcome
    }

    /// Send a message to the streaming chat endpoint.
    ///
    /// Each decoded chunk is appended to an in-progress assistant message and
    /// handed to `on_chunk` as it arrives. If the stream fails part way the
    /// partial reply is kept; if it fails before any text arrived the empty
    /// reply is dropped. A successful empty body leaves an empty reply.
    pub async fn send_streaming<F>(&mut self, message: &str, mut on_chunk: F) -> Outcome
    where
        F: FnMut(&str) + Send,
    {
        let message = message.trim();
        if message.is_empty() || !self.controls().send {
            return Outcome::Skipped;
        }

        self.chat.answer = None;
        self.chat.error = None;
        self.chat.loading = true;
        self.chat.push_user(message);
        self.chat.begin_stream();

        let request = ChatRequest {
            developer_message: self.settings.developer_message.clone(),
            user_message: message.to_owned(),
            api_key: self.api_key.expose().to_owned(),
            model: self.settings.model.clone(),
        };
        debug!(model = %request.model, "starting streaming chat");

        let mut failure = None;
        match self.backend.chat_stream(&request).await {
            Ok(mut chunks) => {
                while let Some(chunk) = chunks.next().await {
                    match chunk {
                        Ok(text) => {
                            self.chat.append_chunk(&text);
                            on_chunk(&text);
                        }
                        Err(error) => {
                            failure = Some(error);
                            break;
                        }
                    }
                }
            }
            Err(error) => failure = Some(error),
        }

        self.chat.finish_stream(failure.is_some());
        self.chat.loading = false;
        match failure {
            None => Outcome::Succeeded,
            Some(error) => {
                warn!(%error, "streaming chat failed");
                self.chat.error = Some(chat_failed(&error));
                Outcome::Failed
            }
        }
    }

    /// Empty the message log and any displayed answer or error.
    pub fn clear_chat(&mut self) {
        self.chat.clear();
    }

    /// Query the server health endpoint.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`ApiError`] unchanged.
    pub async fn health(&self) -> Result<String, ApiError> {
        self.backend.health().await
    }
}

fn upload_failed(error: &ApiError) -> String {
    format!("Upload failed: {}", message_or_unknown(error))
}

fn chat_failed(error: &ApiError) -> String {
    format!("Chat failed: {}", message_or_unknown(error))
}

fn message_or_unknown(error: &ApiError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() { "Unknown error".to_owned() } else { message }
}
