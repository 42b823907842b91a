use anyhow::{Result, anyhow};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use log::{debug, info, warn};

use crate::constants::S3_MAX_PARTS;
use crate::error::UploadError;
use crate::models::{ObjectMetadata, UploadSummary};
use crate::rebuffer::PartBuffer;
use crate::upload::backend::{MultipartBackend, PartId, SessionHandle};

/// Drives one upload attempt end-to-end against a multipart backend.
///
/// The controller owns the attempt's state machine: create a session, feed
/// source chunks through a [`PartBuffer`], submit each emitted part
/// sequentially with 1-based strictly increasing part numbers, then complete
/// with the ordered part list. Any failure after session creation triggers a
/// best-effort abort, except a failed completion, which is reported as-is
/// because the parts have already been handed over.
///
/// Parts are never uploaded concurrently and no part is retried; a failed
/// part fails the attempt.
pub struct UploadController<'a, B: MultipartBackend + ?Sized> {
    backend: &'a B,
    part_size: usize,
}

impl<'a, B: MultipartBackend + ?Sized> UploadController<'a, B> {
    /// Create a controller that cuts parts of `part_size` bytes
    pub fn new(backend: &'a B, part_size: usize) -> Self {
        UploadController { backend, part_size }
    }

    /// Run one attempt: fetch every chunk from `source` and restream it to
    /// the object at `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - Destination object key
    /// * `metadata` - Metadata to record on the destination object
    /// * `source` - The source byte stream, in arbitrary chunk sizes
    ///
    /// # Returns
    ///
    /// An [`UploadSummary`] on success, or the [`UploadError`] naming the
    /// phase that failed. An empty source is a valid upload: the session is
    /// completed with an empty part list.
    pub async fn upload<S>(
        &self,
        key: &str,
        metadata: &ObjectMetadata,
        source: S,
    ) -> Result<UploadSummary, UploadError>
    where
        S: Stream<Item = Result<Bytes>> + Unpin,
    {
        let session = self
            .backend
            .create_session(key, metadata)
            .await
            .map_err(UploadError::SessionCreate)?;

        debug!(
            "Opened multipart session {} for {}",
            session.upload_id, session.key
        );

        let (part_ids, bytes_uploaded) = match self.submit_parts(&session, source).await {
            Ok(result) => result,
            Err(err) => {
                // Hand the session back before surfacing the original error.
                // An abort failure is logged and swallowed so it never masks
                // the error that caused it.
                if let Err(abort_err) = self.backend.abort_session(&session).await {
                    warn!(
                        "Failed to abort multipart session {} for {}: {:#}",
                        session.upload_id, session.key, abort_err
                    );
                }
                return Err(err);
            }
        };

        let parts_uploaded = part_ids.len();
        if let Err(e) = self.backend.complete_session(&session, part_ids).await {
            warn!(
                "Completion failed for {}; session {} may remain open server-side",
                session.key, session.upload_id
            );
            return Err(UploadError::Completion(e));
        }

        info!(
            "Uploaded {} ({} parts, {} bytes)",
            session.key, parts_uploaded, bytes_uploaded
        );

        Ok(UploadSummary {
            key: session.key,
            parts_uploaded,
            bytes_uploaded,
        })
    }

    /// Pull the source dry, submitting every full part and the final
    /// partial part in order. Returns the ordered part ids and the total
    /// byte count.
    async fn submit_parts<S>(
        &self,
        session: &SessionHandle,
        mut source: S,
    ) -> Result<(Vec<PartId>, u64), UploadError>
    where
        S: Stream<Item = Result<Bytes>> + Unpin,
    {
        let mut buffer = PartBuffer::new(self.part_size);
        let mut part_ids: Vec<PartId> = Vec::new();
        let mut bytes_uploaded: u64 = 0;

        while let Some(chunk) = source.next().await {
            let chunk = chunk.map_err(UploadError::Fetch)?;

            for part in buffer.push(&chunk) {
                bytes_uploaded += part.len() as u64;
                let id = self.submit_one(session, part_ids.len() as i64 + 1, part).await?;
                part_ids.push(id);
            }
        }

        if let Some(tail) = buffer.finish() {
            bytes_uploaded += tail.len() as u64;
            let id = self.submit_one(session, part_ids.len() as i64 + 1, tail).await?;
            part_ids.push(id);
        }

        Ok((part_ids, bytes_uploaded))
    }

    async fn submit_one(
        &self,
        session: &SessionHandle,
        part_number: i64,
        body: Bytes,
    ) -> Result<PartId, UploadError> {
        // Providers cap multipart sessions; fail before the provider does.
        if part_number > S3_MAX_PARTS as i64 {
            return Err(UploadError::PartUpload {
                part_number,
                reason: anyhow!(
                    "part limit of {} exceeded, increase the part size",
                    S3_MAX_PARTS
                ),
            });
        }

        debug!(
            "Uploading part {} ({} bytes) for {}",
            part_number,
            body.len(),
            session.key
        );

        self.backend
            .upload_part(session, part_number, body)
            .await
            .map_err(|e| UploadError::PartUpload {
                part_number,
                reason: e,
            })
    }
}
