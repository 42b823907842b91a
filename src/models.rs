use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// A single upload request: fetch this source and restream it to storage.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UploadJob {
    pub source: String,
}

impl UploadJob {
    pub fn new(source: impl Into<String>) -> Self {
        UploadJob {
            source: source.into(),
        }
    }
}

/// Metadata recorded on the destination object at session creation.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ObjectMetadata {
    pub content_type: Option<String>,
}

impl ObjectMetadata {
    pub fn with_content_type(content_type: impl Into<String>) -> Self {
        ObjectMetadata {
            content_type: Some(content_type.into()),
        }
    }
}

/// Destination key for an uploaded object, `<namespace>/<uuid>.<extension>`.
///
/// A fresh key is generated per attempt so retries of the same source never
/// collide with a partially written object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DestinationKey(String);

impl DestinationKey {
    /// Generate a fresh random key under the given namespace
    pub fn generate(namespace: &str, extension: &str) -> Self {
        let namespace = namespace.trim_matches('/');
        DestinationKey(format!("{}/{}.{}", namespace, Uuid::new_v4(), extension))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DestinationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of one successful upload attempt.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UploadSummary {
    pub key: String,
    pub parts_uploaded: usize,
    pub bytes_uploaded: u64,
}

/// Per-job outcome line for the final report.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JobReport {
    pub source: String,
    pub key: Option<String>,
    pub parts_uploaded: usize,
    pub bytes_uploaded: u64,
    pub finished_at: String,
    pub error: Option<String>,
}

/// Aggregate statistics over a queue run.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct JobStats {
    pub succeeded: usize,
    pub failed: usize,
    pub reports: Vec<JobReport>,
}

impl JobStats {
    pub fn record_success(&mut self, source: &str, summary: &UploadSummary) {
        self.succeeded += 1;
        self.reports.push(JobReport {
            source: source.to_string(),
            key: Some(summary.key.clone()),
            parts_uploaded: summary.parts_uploaded,
            bytes_uploaded: summary.bytes_uploaded,
            finished_at: chrono::Utc::now().to_rfc3339(),
            error: None,
        });
    }

    pub fn record_failure(&mut self, source: &str, error: &crate::error::UploadError) {
        self.failed += 1;
        self.reports.push(JobReport {
            source: source.to_string(),
            key: None,
            parts_uploaded: 0,
            bytes_uploaded: 0,
            finished_at: chrono::Utc::now().to_rfc3339(),
            error: Some(format!("{} ({})", error, error.phase())),
        });
    }
}
