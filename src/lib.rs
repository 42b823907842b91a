//! # rs-restream
//!
//! A streaming re-chunking uploader: fetches remote byte streams and
//! restreams them into S3-compatible object storage as multipart uploads.
//!
//! ## Overview
//!
//! rs-restream consumes source streams whose chunk sizes are whatever the
//! transport happens to produce, re-buffers them into fixed-size parts, and
//! uploads the parts sequentially through the provider's multipart API. Each
//! attempt ends in exactly one of three ways: completed with the full
//! ordered part list, aborted after a failure, or a reported completion
//! failure when the parts were already handed over.
//!
//! ## Features
//!
//! - **Fixed-size re-chunking**: Arbitrary input chunk sizes become uniform
//!   parts, with only the final part allowed to be short
//! - **Sequential part uploads**: Parts are numbered from 1 and never
//!   submitted out of order
//! - **Best-effort cleanup**: Failed attempts abort the server-side session
//!   without masking the original error
//! - **Pluggable storage**: Any provider implementing the multipart backend
//!   trait works; S3 ships in the box
//! - **Queue intake**: Sources are dispatched onto a bounded queue and
//!   processed one at a time by a background worker
//!
//! ## Usage
//!
//! ```no_run
//! use rust_restreamer::cloud::{create_s3_client, S3MultipartBackend};
//! use rust_restreamer::fetch::HttpSourceFetcher;
//! use rust_restreamer::jobs::{JobQueue, JobSettings};
//! use rust_restreamer::models::UploadJob;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = create_s3_client(Some("us-east-1"), None)?;
//! let backend = Arc::new(S3MultipartBackend::new(client, "my-bucket"));
//! let fetcher = Arc::new(HttpSourceFetcher::new());
//!
//! let settings = JobSettings {
//!     namespace: "media".to_string(),
//!     extension: "mp4".to_string(),
//!     content_type: Some("video/mp4".to_string()),
//!     part_size: 10 * 1024 * 1024,
//! };
//!
//! let queue = JobQueue::start(backend, fetcher, settings, 100);
//! queue.dispatch(UploadJob::new("https://example.com/video.mp4")).await?;
//!
//! let stats = queue.shutdown().await?;
//! println!("{} uploads succeeded", stats.succeeded);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`models`]: Core data models and structures
//! - [`rebuffer`]: Fixed-size re-chunking of input streams
//! - [`upload`]: Multipart backend trait and the upload controller
//! - [`fetch`]: Source fetching over HTTP
//! - [`cloud`]: S3 client construction and backend implementation
//! - [`jobs`]: Bounded job queue and background worker
//! - [`config`]: Configuration management
//! - [`constants`]: Application-wide constants

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Core data models and structures used throughout the application
pub mod models;

/// Fixed-size re-chunking of arbitrarily chunked byte streams
pub mod rebuffer;

/// Multipart backend trait and the single-attempt upload controller
pub mod upload;

/// Source fetchers that open locators as byte streams
pub mod fetch;

/// Object storage integration (S3)
pub mod cloud;

/// Job intake queue and background worker
pub mod jobs;

/// Configuration management
pub mod config;

/// Upload failure taxonomy
pub mod error;

/// Application constants and configuration values
pub mod constants;
