//! Multipart upload orchestration.
//!
//! The [`backend`] module defines the narrow interface a storage provider
//! must implement; the [`controller`] module drives one upload attempt
//! end-to-end against any such backend.

/// Storage backend trait and session types
pub mod backend;

/// Single-attempt upload state machine
pub mod controller;

pub use backend::{MultipartBackend, PartId, SessionHandle};
pub use controller::UploadController;
