use std::time::Duration;

use futures_util::StreamExt;
use tokio::time::timeout;

use crate::core::parse_index;
use crate::data::Index;
use crate::effects::http::HttpClient;
use crate::error::{FetchError, Result};

/// Loads the remote update index.
pub struct IndexLoader<C: HttpClient> {
    client:  C,
    timeout: Duration,
}

impl<C: HttpClient> IndexLoader<C> {
    /// Default bound for the whole index request.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6);

    pub fn new(client: C) -> Self {
        Self {
            client,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load the index, degrading to an empty index on any failure.
    pub async fn load(&self, url: &str) -> Index {
        match self.try_load(url).await {
            Ok(index) => {
                tracing::info!(url, entries = index.len(), "update index loaded");
                index
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "update index unavailable, continuing without updates");
                Index::default()
            }
        }
    }

    /// Fetch and parse the index within the configured time bound.
    pub async fn try_load(&self, url: &str) -> Result<Index> {
        let payload = timeout(self.timeout, self.fetch_text(url))
            .await
            .map_err(|_| FetchError::Timeout(self.timeout, "update index"))??;
        Ok(parse_index(&payload))
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).await.map_err(FetchError::network)?;
        let mut body = response.body;
        let mut buf = Vec::with_capacity(response.content_length.unwrap_or(0).min(1 << 20) as usize);
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk.map_err(FetchError::network)?);
        }
        String::from_utf8(buf).map_err(FetchError::Decode)
    }
}
