//! In-memory repository for review records.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::review::{
    domain::{ReviewId, ReviewPatch, ReviewRecord, ReviewStatus, Username},
    ports::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult},
};

/// Thread-safe in-memory review repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewRepository {
    state: Arc<RwLock<HashMap<ReviewId, ReviewRecord>>>,
}

impl InMemoryReviewRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored reviews.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn len(&self) -> ReviewRepositoryResult<usize> {
        let reviews = self.state.read().map_err(lock_error)?;
        Ok(reviews.len())
    }

    /// Returns whether no reviews are stored.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn is_empty(&self) -> ReviewRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }

    fn collect_sorted(
        &self,
        predicate: impl Fn(&ReviewRecord) -> bool,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>> {
        let reviews = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<ReviewRecord> = reviews
            .values()
            .filter(|review| predicate(review))
            .cloned()
            .collect();
        matching.sort_by_key(ReviewRecord::timestamp);
        Ok(matching)
    }
}

fn lock_error(err: impl std::fmt::Display) -> ReviewRepositoryError {
    ReviewRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn store(&self, review: &ReviewRecord) -> ReviewRepositoryResult<()> {
        let mut reviews = self.state.write().map_err(lock_error)?;
        if reviews.contains_key(&review.id()) {
            return Err(ReviewRepositoryError::DuplicateReview(review.id()));
        }
        reviews.insert(review.id(), review.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ReviewId) -> ReviewRepositoryResult<Option<ReviewRecord>> {
        let reviews = self.state.read().map_err(lock_error)?;
        Ok(reviews.get(&id).cloned())
    }

    async fn update(&self, id: ReviewId, patch: &ReviewPatch) -> ReviewRepositoryResult<()> {
        let mut reviews = self.state.write().map_err(lock_error)?;
        let review = reviews
            .get_mut(&id)
            .ok_or(ReviewRepositoryError::NotFound(id))?;
        review.apply_patch(patch);
        Ok(())
    }

    async fn find_by_status(
        &self,
        status: ReviewStatus,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>> {
        self.collect_sorted(|review| review.status() == status)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>> {
        self.collect_sorted(|review| review.username() == Some(username))
    }
}
