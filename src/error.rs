use thiserror::Error;

/// Failure taxonomy for a single upload attempt.
///
/// Each variant names the phase of the attempt that failed and wraps the
/// underlying cause. The controller guarantees exactly one variant per
/// failed attempt, so callers can log or report the phase directly.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The source stream could not be opened or failed mid-read
    #[error("source fetch failed: {0:#}")]
    Fetch(anyhow::Error),

    /// The multipart session could not be created
    #[error("failed to create multipart session: {0:#}")]
    SessionCreate(anyhow::Error),

    /// A part upload failed; the session has been aborted on a best-effort basis
    #[error("failed to upload part {part_number}: {reason:#}")]
    PartUpload {
        part_number: i64,
        reason: anyhow::Error,
    },

    /// The completion call failed; the session may remain open server-side
    #[error("failed to complete multipart session: {0:#}")]
    Completion(anyhow::Error),

    /// An explicit abort request failed
    #[error("failed to abort multipart session: {0:#}")]
    Abort(anyhow::Error),
}

impl UploadError {
    /// Short name of the failed phase, for logs and reports
    pub fn phase(&self) -> &'static str {
        match self {
            UploadError::Fetch(_) => "fetch",
            UploadError::SessionCreate(_) => "session-create",
            UploadError::PartUpload { .. } => "part-upload",
            UploadError::Completion(_) => "completion",
            UploadError::Abort(_) => "abort",
        }
    }
}
