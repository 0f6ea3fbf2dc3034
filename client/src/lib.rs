//! # pdfchat-client
//!
//! State model and HTTP transport for a document chat client. A PDF is
//! uploaded to the chat API, which answers questions about it; a second
//! endpoint streams free-form chat answers as plain text.
//!
//! This crate contains the application controller ([`app::ChatApp`]), the
//! per-domain state it owns, configuration, and the REST client. Surfaces
//! (the `pdfchat` terminal binary) drive [`app::ChatApp`] and render its state.

pub mod app;
pub mod config;
pub mod net;
pub mod state;

pub use app::{ChatApp, Controls, Outcome};
pub use config::ClientConfig;
pub use net::api::{ApiClient, ChatBackend, TextStream};
pub use net::types::{ApiError, PdfUpload};
