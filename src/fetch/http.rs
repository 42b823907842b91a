use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use futures::StreamExt;
use log::debug;

use crate::fetch::{SourceFetcher, SourceStream};

/// Fetches sources over HTTP(S) and exposes the response body as a stream.
pub struct HttpSourceFetcher {
    client: reqwest::Client,
}

impl HttpSourceFetcher {
    pub fn new() -> Self {
        HttpSourceFetcher {
            client: reqwest::Client::new(),
        }
    }

    /// Build a fetcher around an existing client, preserving its pool and
    /// timeouts
    pub fn with_client(client: reqwest::Client) -> Self {
        HttpSourceFetcher { client }
    }
}

impl Default for HttpSourceFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    async fn open(&self, locator: &str) -> Result<SourceStream> {
        debug!("Fetching source {}", locator);

        let response = self
            .client
            .get(locator)
            .send()
            .await
            .context(format!("Failed to fetch source: {}", locator))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "Source {} returned status {}",
                locator,
                status
            ));
        }

        let locator = locator.to_string();
        let stream = response
            .bytes_stream()
            .map(move |chunk| chunk.context(format!("Failed to read source body: {}", locator)))
            .boxed();

        Ok(stream)
    }
}
