//! Job intake and dispatch.
//!
//! Sources to upload arrive as [`crate::models::UploadJob`]s on a bounded
//! queue and are processed strictly one at a time by a background worker.

/// Bounded job queue with a sequential background worker
pub mod queue;

pub use queue::{JobQueue, JobSettings, run_attempt};
