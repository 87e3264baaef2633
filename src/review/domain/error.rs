//! Error types for review domain validation and lifecycle guards.

use super::{ReviewId, ReviewStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating review domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewDomainError {
    /// The review identifier is not a valid UUID.
    #[error("invalid review id '{0}'")]
    InvalidReviewId(String),

    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the storage limit.
    #[error("username exceeds {max} characters")]
    UsernameTooLong {
        /// Maximum permitted length.
        max: usize,
    },

    /// The technical score lies outside the review scale.
    #[error("review score {value} is outside {min}..={max}")]
    ScoreOutOfRange {
        /// Rejected score.
        value: i64,
        /// Lowest permitted score.
        min: u8,
        /// Highest permitted score.
        max: u8,
    },

    /// A dignity, honesty or integrity score lies outside its bound.
    #[error("{dimension} score {value} is outside {min}..={max}")]
    DhiScoreOutOfRange {
        /// Name of the offending dimension.
        dimension: &'static str,
        /// Rejected score.
        value: i64,
        /// Lowest permitted score.
        min: u8,
        /// Highest permitted score.
        max: u8,
    },

    /// The feedback sentiment is not recognised.
    #[error("unknown feedback sentiment '{0}', expected 'up' or 'down'")]
    UnknownSentiment(String),

    /// The requested status change is not permitted.
    #[error("review {review_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Review being changed.
        review_id: ReviewId,
        /// Current status.
        from: ReviewStatus,
        /// Requested status.
        to: ReviewStatus,
    },

    /// Next-task generation was requested before feedback was recorded.
    #[error("review {review_id} is locked in status {status}; admin feedback is required first")]
    NextTaskLocked {
        /// Locked review.
        review_id: ReviewId,
        /// Current status.
        status: ReviewStatus,
    },

    /// A persisted record violates a lifecycle invariant.
    #[error("review {review_id} is inconsistent: {reason}")]
    InconsistentRecord {
        /// Offending review.
        review_id: ReviewId,
        /// Violated invariant.
        reason: &'static str,
    },
}

/// Error returned while parsing review statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown review status: {0}")]
pub struct ParseReviewStatusError(pub String);
