//! Repository port for review record persistence.

use crate::review::domain::{ReviewId, ReviewPatch, ReviewRecord, ReviewStatus, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for review repository operations.
pub type ReviewRepositoryResult<T> = Result<T, ReviewRepositoryError>;

/// Review persistence contract.
///
/// Updates are column-subset writes keyed by review id; concurrent updates
/// to the same record are last-write-wins.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts a new review record.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRepositoryError::DuplicateReview`] when the review id
    /// already exists.
    async fn store(&self, review: &ReviewRecord) -> ReviewRepositoryResult<()>;

    /// Finds a review by identifier.
    ///
    /// Returns `None` when the review does not exist.
    async fn find_by_id(&self, id: ReviewId) -> ReviewRepositoryResult<Option<ReviewRecord>>;

    /// Applies a partial update to an existing review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRepositoryError::NotFound`] when no record matched.
    async fn update(&self, id: ReviewId, patch: &ReviewPatch) -> ReviewRepositoryResult<()>;

    /// Returns reviews in the given status, oldest first.
    async fn find_by_status(
        &self,
        status: ReviewStatus,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>>;

    /// Returns reviews submitted by the given user, oldest first.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>>;
}

/// Errors returned by review repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ReviewRepositoryError {
    /// A review with the same identifier already exists.
    #[error("duplicate review identifier: {0}")]
    DuplicateReview(ReviewId),

    /// The review was not found.
    #[error("review not found: {0}")]
    NotFound(ReviewId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReviewRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
