use std::sync::Arc;

use anyhow::{Result, anyhow};
use log::{error, info};
use tokio::sync::mpsc;

use crate::error::UploadError;
use crate::fetch::SourceFetcher;
use crate::models::{DestinationKey, JobStats, ObjectMetadata, UploadJob, UploadSummary};
use crate::upload::{MultipartBackend, UploadController};

/// Per-attempt settings shared by every job on a queue.
#[derive(Debug, Clone)]
pub struct JobSettings {
    pub namespace: String,
    pub extension: String,
    pub content_type: Option<String>,
    pub part_size: usize,
}

/// Run a single upload attempt for one job.
///
/// Opens the source, generates a fresh destination key, and drives the
/// upload controller to a terminal state. Each attempt gets its own key, so
/// re-dispatching a failed source never collides with an earlier attempt.
pub async fn run_attempt(
    backend: &dyn MultipartBackend,
    fetcher: &dyn SourceFetcher,
    settings: &JobSettings,
    job: &UploadJob,
) -> Result<UploadSummary, UploadError> {
    let source = fetcher
        .open(&job.source)
        .await
        .map_err(UploadError::Fetch)?;

    let key = DestinationKey::generate(&settings.namespace, &settings.extension);
    let metadata = ObjectMetadata {
        content_type: settings.content_type.clone(),
    };

    info!("Restreaming {} to {}", job.source, key);

    let controller = UploadController::new(backend, settings.part_size);
    controller.upload(key.as_str(), &metadata, source).await
}

/// Bounded intake queue with a sequential background worker.
///
/// Jobs are dispatched onto a bounded channel and consumed one at a time by
/// a spawned worker task. Shutting the queue down closes the channel and
/// waits for the worker to drain, returning the aggregate [`JobStats`].
pub struct JobQueue {
    sender: mpsc::Sender<UploadJob>,
    worker: tokio::task::JoinHandle<JobStats>,
}

impl JobQueue {
    /// Spawn the worker and return the queue handle
    pub fn start(
        backend: Arc<dyn MultipartBackend>,
        fetcher: Arc<dyn SourceFetcher>,
        settings: JobSettings,
        capacity: usize,
    ) -> Self {
        let (sender, mut receiver) = mpsc::channel::<UploadJob>(capacity.max(1));

        let worker = tokio::spawn(async move {
            let mut stats = JobStats::default();

            while let Some(job) = receiver.recv().await {
                match run_attempt(backend.as_ref(), fetcher.as_ref(), &settings, &job).await {
                    Ok(summary) => {
                        stats.record_success(&job.source, &summary);
                    }
                    Err(e) => {
                        error!("Upload of {} failed in {} phase: {}", job.source, e.phase(), e);
                        stats.record_failure(&job.source, &e);
                    }
                }
            }

            stats
        });

        JobQueue { sender, worker }
    }

    /// Enqueue one job, waiting if the queue is at capacity
    pub async fn dispatch(&self, job: UploadJob) -> Result<()> {
        self.sender
            .send(job)
            .await
            .map_err(|_| anyhow!("Job queue is closed"))
    }

    /// Close the queue and wait for the worker to finish the backlog.
    ///
    /// # Returns
    ///
    /// Aggregate statistics over every job the worker processed
    pub async fn shutdown(self) -> Result<JobStats> {
        // Drop sender to close the channel
        drop(self.sender);

        self.worker
            .await
            .map_err(|e| anyhow!("Upload worker failed: {}", e))
    }
}
