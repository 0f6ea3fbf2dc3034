//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`credentials`, `session`, `chat`, `settings`) so
//! the controller and the surfaces can depend on small focused models. None of
//! it is persisted.

pub mod chat;
pub mod credentials;
pub mod session;
pub mod settings;
