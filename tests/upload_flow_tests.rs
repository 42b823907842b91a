use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream;

use rust_restreamer::error::UploadError;
use rust_restreamer::fetch::{SourceFetcher, SourceStream};
use rust_restreamer::jobs::{JobQueue, JobSettings};
use rust_restreamer::models::{ObjectMetadata, UploadJob};
use rust_restreamer::upload::{MultipartBackend, PartId, SessionHandle, UploadController};

/// Backend fake that records every call and can fail on demand.
#[derive(Default)]
struct RecordingBackend {
    fail_create: bool,
    fail_part: Option<i64>,
    fail_complete: bool,
    sessions_created: AtomicUsize,
    aborts: AtomicUsize,
    completions: AtomicUsize,
    uploaded_parts: Mutex<Vec<(i64, usize)>>,
    completed_with: Mutex<Option<Vec<i64>>>,
}

impl RecordingBackend {
    fn part_sizes(&self) -> Vec<usize> {
        self.uploaded_parts
            .lock()
            .unwrap()
            .iter()
            .map(|(_, len)| *len)
            .collect()
    }

    fn part_numbers(&self) -> Vec<i64> {
        self.uploaded_parts
            .lock()
            .unwrap()
            .iter()
            .map(|(n, _)| *n)
            .collect()
    }
}

#[async_trait]
impl MultipartBackend for RecordingBackend {
    async fn create_session(&self, key: &str, _metadata: &ObjectMetadata) -> Result<SessionHandle> {
        if self.fail_create {
            return Err(anyhow!("create refused"));
        }
        self.sessions_created.fetch_add(1, Ordering::SeqCst);
        Ok(SessionHandle {
            key: key.to_string(),
            upload_id: "upload-1".to_string(),
        })
    }

    async fn upload_part(
        &self,
        _session: &SessionHandle,
        part_number: i64,
        body: Bytes,
    ) -> Result<PartId> {
        if self.fail_part == Some(part_number) {
            return Err(anyhow!("part {} refused", part_number));
        }
        self.uploaded_parts
            .lock()
            .unwrap()
            .push((part_number, body.len()));
        Ok(PartId {
            part_number,
            e_tag: format!("etag-{}", part_number),
        })
    }

    async fn complete_session(&self, _session: &SessionHandle, parts: Vec<PartId>) -> Result<()> {
        if self.fail_complete {
            return Err(anyhow!("complete refused"));
        }
        self.completions.fetch_add(1, Ordering::SeqCst);
        *self.completed_with.lock().unwrap() =
            Some(parts.iter().map(|p| p.part_number).collect());
        Ok(())
    }

    async fn abort_session(&self, _session: &SessionHandle) -> Result<()> {
        self.aborts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn byte_stream(chunks: Vec<Vec<u8>>) -> impl stream::Stream<Item = Result<Bytes>> + Unpin {
    stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c))))
}

#[tokio::test]
async fn test_successful_upload_completes_with_ordered_parts() {
    let backend = RecordingBackend::default();
    let controller = UploadController::new(&backend, 10);

    let summary = controller
        .upload(
            "media/clip.mp4",
            &ObjectMetadata::with_content_type("video/mp4"),
            byte_stream(vec![vec![1u8; 7], vec![2u8; 7]]),
        )
        .await
        .unwrap();

    assert_eq!(summary.parts_uploaded, 2);
    assert_eq!(summary.bytes_uploaded, 14);
    assert_eq!(backend.part_sizes(), vec![10, 4]);
    assert_eq!(backend.part_numbers(), vec![1, 2]);
    assert_eq!(
        backend.completed_with.lock().unwrap().clone(),
        Some(vec![1, 2])
    );
    assert_eq!(backend.aborts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failing_part_aborts_exactly_once_and_never_completes() {
    let backend = RecordingBackend {
        fail_part: Some(3),
        ..Default::default()
    };
    let controller = UploadController::new(&backend, 10);

    // 50 bytes at part size 10 would make 5 parts; part 3 fails.
    let err = controller
        .upload(
            "media/clip.mp4",
            &ObjectMetadata::default(),
            byte_stream(vec![vec![0u8; 50]]),
        )
        .await
        .unwrap_err();

    match err {
        UploadError::PartUpload { part_number, .. } => assert_eq!(part_number, 3),
        other => panic!("expected PartUpload, got {:?}", other),
    }

    assert_eq!(backend.part_numbers(), vec![1, 2]);
    assert_eq!(backend.aborts.load(Ordering::SeqCst), 1);
    assert_eq!(backend.completions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_source_error_mid_stream_aborts() {
    let backend = RecordingBackend::default();
    let controller = UploadController::new(&backend, 10);

    let chunks: Vec<Result<Bytes>> = vec![
        Ok(Bytes::from(vec![0u8; 15])),
        Err(anyhow!("source dropped the connection")),
    ];

    let err = controller
        .upload(
            "media/clip.mp4",
            &ObjectMetadata::default(),
            stream::iter(chunks),
        )
        .await
        .unwrap_err();

    assert_eq!(err.phase(), "fetch");
    // The full part cut before the error was already submitted.
    assert_eq!(backend.part_numbers(), vec![1]);
    assert_eq!(backend.aborts.load(Ordering::SeqCst), 1);
    assert_eq!(backend.completions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_source_completes_with_empty_part_list() {
    let backend = RecordingBackend::default();
    let controller = UploadController::new(&backend, 10);

    let summary = controller
        .upload(
            "media/clip.mp4",
            &ObjectMetadata::default(),
            byte_stream(vec![]),
        )
        .await
        .unwrap();

    assert_eq!(summary.parts_uploaded, 0);
    assert_eq!(summary.bytes_uploaded, 0);
    assert_eq!(backend.completed_with.lock().unwrap().clone(), Some(vec![]));
    assert_eq!(backend.aborts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_session_create_failure_leaves_backend_untouched() {
    let backend = RecordingBackend {
        fail_create: true,
        ..Default::default()
    };
    let controller = UploadController::new(&backend, 10);

    let err = controller
        .upload(
            "media/clip.mp4",
            &ObjectMetadata::default(),
            byte_stream(vec![vec![0u8; 5]]),
        )
        .await
        .unwrap_err();

    assert_eq!(err.phase(), "session-create");
    assert!(backend.part_numbers().is_empty());
    assert_eq!(backend.aborts.load(Ordering::SeqCst), 0);
    assert_eq!(backend.completions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_completion_failure_is_reported_without_abort() {
    let backend = RecordingBackend {
        fail_complete: true,
        ..Default::default()
    };
    let controller = UploadController::new(&backend, 10);

    let err = controller
        .upload(
            "media/clip.mp4",
            &ObjectMetadata::default(),
            byte_stream(vec![vec![0u8; 12]]),
        )
        .await
        .unwrap_err();

    assert_eq!(err.phase(), "completion");
    assert_eq!(backend.aborts.load(Ordering::SeqCst), 0);
    assert_eq!(backend.part_numbers(), vec![1, 2]);
}

/// Fetcher fake serving fixed chunks, failing for sources marked missing.
struct FixtureFetcher;

#[async_trait]
impl SourceFetcher for FixtureFetcher {
    async fn open(&self, locator: &str) -> Result<SourceStream> {
        if locator.contains("missing") {
            return Err(anyhow!("no such source: {}", locator));
        }
        let chunks = vec![
            Ok(Bytes::from(vec![0u8; 6])),
            Ok(Bytes::from(vec![1u8; 6])),
            Ok(Bytes::from(vec![2u8; 6])),
        ];
        Ok(stream::iter(chunks).boxed())
    }
}

#[tokio::test]
async fn test_queue_runs_jobs_sequentially_and_reports() {
    let backend = Arc::new(RecordingBackend::default());
    let settings = JobSettings {
        namespace: "media".to_string(),
        extension: "mp4".to_string(),
        content_type: Some("video/mp4".to_string()),
        part_size: 10,
    };

    let queue = JobQueue::start(backend.clone(), Arc::new(FixtureFetcher), settings, 8);

    queue
        .dispatch(UploadJob::new("http://example.com/a.mp4"))
        .await
        .unwrap();
    queue
        .dispatch(UploadJob::new("http://example.com/missing.mp4"))
        .await
        .unwrap();
    queue
        .dispatch(UploadJob::new("http://example.com/b.mp4"))
        .await
        .unwrap();

    let stats = queue.shutdown().await.unwrap();

    assert_eq!(stats.succeeded, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.reports.len(), 3);

    // 18 bytes per good source at part size 10 makes parts of 10 and 8.
    assert_eq!(backend.sessions_created.load(Ordering::SeqCst), 2);
    assert_eq!(backend.completions.load(Ordering::SeqCst), 2);

    let failed = &stats.reports[1];
    assert_eq!(failed.source, "http://example.com/missing.mp4");
    assert!(failed.key.is_none());
    assert!(failed.error.as_deref().unwrap().contains("fetch"));

    let ok = &stats.reports[0];
    assert_eq!(ok.parts_uploaded, 2);
    assert_eq!(ok.bytes_uploaded, 18);
    let key = ok.key.as_deref().unwrap();
    assert!(key.starts_with("media/"));
    assert!(key.ends_with(".mp4"));
}

#[tokio::test]
async fn test_shutdown_with_no_jobs_returns_empty_stats() {
    let backend = Arc::new(RecordingBackend::default());
    let settings = JobSettings {
        namespace: "media".to_string(),
        extension: "mp4".to_string(),
        content_type: None,
        part_size: 10,
    };

    let queue = JobQueue::start(backend, Arc::new(FixtureFetcher), settings, 8);
    let stats = queue.shutdown().await.unwrap();

    assert_eq!(stats.succeeded, 0);
    assert_eq!(stats.failed, 0);
    assert!(stats.reports.is_empty());
}
