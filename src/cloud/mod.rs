//! Object storage integration.
//!
//! This module provides the S3 implementation of the multipart backend,
//! letting the uploader restream sources into any S3-compatible bucket.

/// S3 client construction
pub mod client;

/// S3 multipart backend implementation
pub mod s3;

pub use client::create_s3_client;
pub use s3::S3MultipartBackend;
