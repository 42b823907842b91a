//! Global constants for the rs-restream application.
//!
//! This module centralizes all hardcoded values to improve maintainability
//! and make configuration changes easier.

// Part sizing constants
/// Default part size for multipart uploads (10MB)
pub const DEFAULT_PART_SIZE: usize = 10 * 1024 * 1024;

/// S3 minimum part size for multipart uploads (5MB)
pub const S3_MIN_PART_SIZE: usize = 5 * 1024 * 1024;

/// S3 maximum parts per upload
pub const S3_MAX_PARTS: usize = 10000;

// Job queue constants
/// Capacity of the bounded upload job queue
pub const JOB_QUEUE_CAPACITY: usize = 100;

// Destination key defaults
/// Default key namespace (prefix) for uploaded objects
pub const DEFAULT_NAMESPACE: &str = "media";

/// Default file extension for generated destination keys
pub const DEFAULT_EXTENSION: &str = "mp4";

/// Default content type recorded on uploaded objects
pub const DEFAULT_CONTENT_TYPE: &str = "video/mp4";

// Default file names
pub const DEFAULT_CONFIG_NAME: &str = "config.yaml";
