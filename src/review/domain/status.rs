//! Review lifecycle states and their permitted transitions.

use super::ParseReviewStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review lifecycle state.
///
/// ```text
/// pending_feedback ──record feedback──▶ feedback_provided ─┐
///                                              ▲            │ record feedback again
///                                              └────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// The model review exists and awaits admin feedback.
    PendingFeedback,
    /// An admin has scored the submission; follow-up generation is unlocked.
    FeedbackProvided,
}

impl ReviewStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 2] = [Self::PendingFeedback, Self::FeedbackProvided];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingFeedback => "pending_feedback",
            Self::FeedbackProvided => "feedback_provided",
        }
    }

    /// Returns whether the lifecycle permits moving from `self` to `target`.
    ///
    /// Status never regresses. Recording feedback on an already scored
    /// review is a self-transition on `feedback_provided`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::PendingFeedback | Self::FeedbackProvided, Self::FeedbackProvided)
        )
    }

    /// Returns whether a follow-up task may be generated in this status.
    #[must_use]
    pub const fn permits_next_task(self) -> bool {
        matches!(self, Self::FeedbackProvided)
    }
}

impl TryFrom<&str> for ReviewStatus {
    type Error = ParseReviewStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending_feedback" => Ok(Self::PendingFeedback),
            "feedback_provided" => Ok(Self::FeedbackProvided),
            _ => Err(ParseReviewStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
