//! `reqwest`-backed content fetcher.

use crate::review::ports::{ContentFetcher, FetchError};
use async_trait::async_trait;
use tracing::debug;

/// Fetches linked submissions with a single GET request.
#[derive(Debug, Clone)]
pub struct HttpContentFetcher {
    client: reqwest::Client,
}

impl HttpContentFetcher {
    /// Creates a fetcher that shares the given HTTP client.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let transport = |err: reqwest::Error| FetchError::Transport {
            url: url.to_owned(),
            reason: err.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        debug!(url, bytes = body.len(), "fetched linked submission");
        Ok(body.to_vec())
    }
}
