//! Feedback aggregation: admin sentiment and DHI scores folded into a review.

use crate::review::{
    domain::{AdminFeedback, DhiScores, ReviewDomainError, ReviewId, ReviewRecord, Sentiment},
    ports::{ReviewRepository, ReviewRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Raw admin feedback as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFeedbackRequest {
    sentiment: String,
    dignity: i64,
    honesty: i64,
    integrity: i64,
}

impl RecordFeedbackRequest {
    /// Creates a feedback request from unvalidated input.
    #[must_use]
    pub fn new(sentiment: impl Into<String>, dignity: i64, honesty: i64, integrity: i64) -> Self {
        Self {
            sentiment: sentiment.into(),
            dignity,
            honesty,
            integrity,
        }
    }

    fn validate(&self) -> Result<AdminFeedback, ReviewDomainError> {
        let sentiment = Sentiment::try_from(self.sentiment.as_str())?;
        let dhi_scores = DhiScores::new(self.dignity, self.honesty, self.integrity)?;
        Ok(AdminFeedback::new(sentiment, dhi_scores))
    }
}

/// Service-level errors for feedback recording.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// The referenced review does not exist.
    #[error("review with id '{0}' not found")]
    ReviewNotFound(ReviewId),

    /// The feedback payload was rejected.
    #[error(transparent)]
    Validation(#[from] ReviewDomainError),

    /// Review persistence failed.
    #[error(transparent)]
    Repository(ReviewRepositoryError),
}

impl From<ReviewRepositoryError> for FeedbackError {
    fn from(err: ReviewRepositoryError) -> Self {
        match err {
            ReviewRepositoryError::NotFound(id) => Self::ReviewNotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for feedback operations.
pub type FeedbackResult<T> = Result<T, FeedbackError>;

/// Records admin feedback and the derived overall score on reviews.
#[derive(Clone)]
pub struct FeedbackAggregator<R>
where
    R: ReviewRepository,
{
    reviews: Arc<R>,
}

impl<R> FeedbackAggregator<R>
where
    R: ReviewRepository,
{
    /// Creates a new aggregator.
    #[must_use]
    pub const fn new(reviews: Arc<R>) -> Self {
        Self { reviews }
    }

    /// Validates and records admin feedback, returning the updated review.
    ///
    /// The overall score is the mean of the model score and the three DHI
    /// scores. Recording feedback again overwrites the earlier values.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::ReviewNotFound`] when the review does not
    /// exist, checked before the payload. Returns
    /// [`FeedbackError::Validation`] for an unknown sentiment or an
    /// out-of-range DHI score, in which case nothing is written.
    pub async fn record_feedback(
        &self,
        review_id: ReviewId,
        request: &RecordFeedbackRequest,
    ) -> FeedbackResult<ReviewRecord> {
        let mut record = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or(FeedbackError::ReviewNotFound(review_id))?;
        let feedback = request.validate()?;

        let patch = record.record_feedback(feedback)?;
        self.reviews.update(review_id, &patch).await?;

        let refreshed = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or(FeedbackError::ReviewNotFound(review_id))?;
        if let Some(recorded) = refreshed.feedback() {
            info!(
                review_id = %review_id,
                sentiment = %recorded.sentiment(),
                overall_score = %recorded.overall_score(),
                "feedback recorded"
            );
        }
        Ok(refreshed)
    }
}
