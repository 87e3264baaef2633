//! Model-produced assessment payloads.
//!
//! These shapes are what the model service is asked to produce. They are
//! opaque to the workflow beyond shape and range validation.

use super::ReviewDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Technical score assigned by the model, on a fixed 0–10 scale.
///
/// The scale matches the 1–10 range of the human DHI dimensions so that
/// the overall score averages comparable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ReviewScore(u8);

impl ReviewScore {
    /// Lowest technical score.
    pub const MIN: u8 = 0;
    /// Highest technical score.
    pub const MAX: u8 = 10;

    /// Creates a validated score.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::ScoreOutOfRange`] when the value lies
    /// outside `0..=10`.
    pub fn new(value: i64) -> Result<Self, ReviewDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|score| (Self::MIN..=Self::MAX).contains(score))
            .map(Self)
            .ok_or(ReviewDomainError::ScoreOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// Returns the numeric score.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for ReviewScore {
    type Error = ReviewDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReviewScore> for u8 {
    fn from(value: ReviewScore) -> Self {
        value.0
    }
}

impl fmt::Display for ReviewScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structured review of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewData {
    /// Task the submission was reviewed against, as echoed by the model.
    pub task_id: String,
    /// Technical score.
    pub score: ReviewScore,
    /// Strengths, in the order the model listed them.
    pub done_well: Vec<String>,
    /// Gaps, in the order the model listed them.
    pub missing: Vec<String>,
    /// One-paragraph summary of the submission.
    pub submission_summary: String,
}

/// Follow-up task suggested once a review has been scored by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextTask {
    /// Title of the follow-up task.
    pub title: String,
    /// Ordered learning objectives.
    pub objectives: Vec<String>,
    /// Expected deliverables.
    pub deliverables: String,
}
