//! Source fetching: turning a locator into a byte stream.
//!
//! The uploader never touches the network for its input directly; it goes
//! through the [`SourceFetcher`] trait so tests and embedders can substitute
//! their own streams.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// HTTP source fetcher backed by reqwest
pub mod http;

pub use http::HttpSourceFetcher;

/// A source's byte stream, in whatever chunk sizes the transport produces.
pub type SourceStream = BoxStream<'static, Result<Bytes>>;

/// A trait for opening a source locator as a chunked byte stream.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Open the source and return its byte stream.
    ///
    /// Errors here mean the source could not be reached at all; errors
    /// surfaced later by the stream mean it failed mid-read.
    async fn open(&self, locator: &str) -> Result<SourceStream>;
}
