//! Port for fetching linked submission content.

use async_trait::async_trait;
use thiserror::Error;

/// Retrieves the raw bytes behind a submission link.
///
/// Implementations make exactly one request and never retry.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetches the resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the request cannot be made or the
    /// resource answers with a non-success status.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Failure to retrieve a linked submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The resource answered with a non-success status.
    #[error("fetching {url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The request could not be completed.
    #[error("fetching {url} failed: {reason}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport failure description.
        reason: String,
    },

    /// The resource body is not UTF-8 text.
    #[error("content at {url} is not valid UTF-8")]
    NotText {
        /// Requested URL.
        url: String,
    },
}
