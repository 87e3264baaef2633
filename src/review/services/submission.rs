//! Normalizes text, file and link submissions into one text body.

use crate::review::ports::{ContentFetcher, FetchError};
use reqwest::Url;
use std::str::Utf8Error;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

const SOURCE_HOST: &str = "github.com";
const RAW_CONTENT_HOST: &str = "raw.githubusercontent.com";
const BLOB_SEGMENT: &str = "blob";
const BLOB_SEGMENT_POSITION: usize = 2;

/// Work submitted for review, in one of the three accepted forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Raw text, forwarded unchanged (empty text included).
    Text(String),
    /// Uploaded file bytes, expected to be UTF-8.
    File(Vec<u8>),
    /// Link to the source, fetched once.
    Link(String),
}

/// Failures while resolving a submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// Uploaded bytes are not valid UTF-8.
    #[error("submission file is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),

    /// The linked resource could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Rewrites source-hosting UI links to their raw-content counterpart.
///
/// `https://github.com/u/r/blob/main/f.py` becomes
/// `https://raw.githubusercontent.com/u/r/main/f.py`. Only a `blob` segment
/// directly after `owner/repo` is dropped. Links to any other host, or links
/// that do not parse, are returned unchanged.
#[must_use]
pub fn raw_content_url(link: &str) -> String {
    let Ok(mut url) = Url::parse(link) else {
        return link.to_owned();
    };
    if url.host_str() != Some(SOURCE_HOST) {
        return link.to_owned();
    }
    if url.set_host(Some(RAW_CONTENT_HOST)).is_err() {
        return link.to_owned();
    }
    let mut segments: Vec<String> = url
        .path_segments()
        .map(|parts| parts.map(str::to_owned).collect())
        .unwrap_or_default();
    if segments.get(BLOB_SEGMENT_POSITION).map(String::as_str) == Some(BLOB_SEGMENT) {
        segments.remove(BLOB_SEGMENT_POSITION);
        url.set_path(&format!("/{}", segments.join("/")));
    }
    url.into()
}

/// Resolves submissions into plain text.
#[derive(Clone)]
pub struct SubmissionResolver<F>
where
    F: ContentFetcher,
{
    fetcher: Arc<F>,
}

impl<F> SubmissionResolver<F>
where
    F: ContentFetcher,
{
    /// Creates a resolver using the given fetcher for links.
    #[must_use]
    pub const fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// Produces the submission body.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Decode`] for non-UTF-8 file bytes and
    /// [`SubmissionError::Fetch`] when a link cannot be fetched or does not
    /// contain UTF-8 text.
    pub async fn resolve(&self, submission: Submission) -> Result<String, SubmissionError> {
        match submission {
            Submission::Text(text) => Ok(text),
            Submission::File(bytes) => {
                let text = String::from_utf8(bytes).map_err(|err| err.utf8_error())?;
                Ok(text)
            }
            Submission::Link(link) => self.fetch_link(&link).await,
        }
    }

    async fn fetch_link(&self, link: &str) -> Result<String, SubmissionError> {
        let url = raw_content_url(link);
        debug!(link, url = %url, "resolving linked submission");
        let bytes = self
            .fetcher
            .fetch(&url)
            .await
            .inspect_err(|err| warn!(url = %url, error = %err, "linked submission fetch failed"))?;
        String::from_utf8(bytes).map_err(|_| SubmissionError::Fetch(FetchError::NotText { url }))
    }
}
