//! Network layer for the chat API.
//!
//! DESIGN
//! ======
//! `types` holds the wire DTOs and the transport error, `decode` turns raw
//! streamed bytes into text, and `api` owns the `reqwest` client plus the
//! `ChatBackend` seam the application controller is written against.

pub mod api;
pub mod decode;
pub mod types;
