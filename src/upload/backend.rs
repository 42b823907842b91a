use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

#[cfg(test)]
use mockall::automock;

use crate::models::ObjectMetadata;

/// Handle to an open multipart session.
///
/// Wraps the provider-assigned upload id together with the destination key,
/// which is all a backend needs to address parts of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub key: String,
    pub upload_id: String,
}

/// Identifier of one successfully uploaded part.
///
/// The `e_tag` is an opaque token returned by the provider; it must be
/// echoed back verbatim on completion, in part-number order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartId {
    pub part_number: i64,
    pub e_tag: String,
}

/// A trait for storage providers that support multipart object uploads.
///
/// This is the full surface the upload controller needs: open a session,
/// upload numbered parts, then either complete with the ordered part list
/// or abort. Implementations do not retry; failure handling is the
/// controller's job.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MultipartBackend: Send + Sync {
    /// Open a multipart session for the object at `key`
    async fn create_session(&self, key: &str, metadata: &ObjectMetadata) -> Result<SessionHandle>;

    /// Upload one part; `part_number` is 1-based and strictly increasing
    async fn upload_part(
        &self,
        session: &SessionHandle,
        part_number: i64,
        body: Bytes,
    ) -> Result<PartId>;

    /// Finalize the session, assembling the object from the listed parts
    async fn complete_session(&self, session: &SessionHandle, parts: Vec<PartId>) -> Result<()>;

    /// Abandon the session and discard any uploaded parts
    async fn abort_session(&self, session: &SessionHandle) -> Result<()>;
}
