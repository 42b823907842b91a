use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use rusoto_core::ByteStream;
use rusoto_s3::{
    S3Client, S3,
    CreateMultipartUploadRequest, UploadPartRequest, CompleteMultipartUploadRequest,
    CompletedPart, CompletedMultipartUpload, AbortMultipartUploadRequest,
};

use crate::models::ObjectMetadata;
use crate::upload::backend::{MultipartBackend, PartId, SessionHandle};

/// S3 implementation of the multipart backend.
///
/// One instance targets one bucket; destination keys are supplied per
/// session. The implementation is a thin mapping onto the S3 multipart
/// API and performs no retries of its own.
pub struct S3MultipartBackend {
    client: Arc<S3Client>,
    bucket: String,
}

impl S3MultipartBackend {
    pub fn new(client: Arc<S3Client>, bucket: impl Into<String>) -> Self {
        S3MultipartBackend {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl MultipartBackend for S3MultipartBackend {
    async fn create_session(&self, key: &str, metadata: &ObjectMetadata) -> Result<SessionHandle> {
        let create_result = self
            .client
            .create_multipart_upload(CreateMultipartUploadRequest {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                content_type: metadata.content_type.clone(),
                ..Default::default()
            })
            .await
            .context("Failed to create multipart upload")?;

        let upload_id = create_result
            .upload_id
            .ok_or_else(|| anyhow!("No upload ID returned from S3"))?;

        debug!("Started multipart upload with ID: {} for {}", upload_id, key);

        Ok(SessionHandle {
            key: key.to_string(),
            upload_id,
        })
    }

    async fn upload_part(
        &self,
        session: &SessionHandle,
        part_number: i64,
        body: Bytes,
    ) -> Result<PartId> {
        let content_length = body.len() as i64;

        let output = self
            .client
            .upload_part(UploadPartRequest {
                bucket: self.bucket.clone(),
                key: session.key.clone(),
                upload_id: session.upload_id.clone(),
                part_number,
                content_length: Some(content_length),
                body: Some(ByteStream::from(body.to_vec())),
                ..Default::default()
            })
            .await
            .context(format!("Failed to upload part {}", part_number))?;

        let e_tag = output
            .e_tag
            .ok_or_else(|| anyhow!("No ETag returned for part {}", part_number))?;

        Ok(PartId { part_number, e_tag })
    }

    async fn complete_session(&self, session: &SessionHandle, parts: Vec<PartId>) -> Result<()> {
        let completed_parts: Vec<CompletedPart> = parts
            .into_iter()
            .map(|p| CompletedPart {
                e_tag: Some(p.e_tag),
                part_number: Some(p.part_number),
            })
            .collect();

        self.client
            .complete_multipart_upload(CompleteMultipartUploadRequest {
                bucket: self.bucket.clone(),
                key: session.key.clone(),
                upload_id: session.upload_id.clone(),
                multipart_upload: Some(CompletedMultipartUpload {
                    parts: Some(completed_parts),
                }),
                ..Default::default()
            })
            .await
            .context("Failed to complete multipart upload")?;

        debug!("Completed multipart upload for {}", session.key);

        Ok(())
    }

    async fn abort_session(&self, session: &SessionHandle) -> Result<()> {
        self.client
            .abort_multipart_upload(AbortMultipartUploadRequest {
                bucket: self.bucket.clone(),
                key: session.key.clone(),
                upload_id: session.upload_id.clone(),
                ..Default::default()
            })
            .await
            .context("Failed to abort multipart upload")?;

        debug!("Aborted multipart upload for {}", session.key);

        Ok(())
    }
}
