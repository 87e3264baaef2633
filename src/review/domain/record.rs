//! Review record aggregate root.

use super::{
    AdminFeedback, NextTask, RecordedFeedback, ReviewData, ReviewDomainError, ReviewId,
    ReviewPatch, ReviewStatus, Username,
};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Review of one submission, with its feedback and follow-up state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    review_id: ReviewId,
    task_id: TaskId,
    username: Option<Username>,
    review_data: ReviewData,
    feedback_note: String,
    next_task: Option<NextTask>,
    #[serde(flatten)]
    feedback: Option<RecordedFeedback>,
    status: ReviewStatus,
    timestamp: DateTime<Utc>,
}

/// Parameter object for creating a review from completed model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Task the submission was reviewed against.
    pub task_id: TaskId,
    /// Submitter identity, when known.
    pub username: Option<Username>,
    /// Structured model review.
    pub review_data: ReviewData,
    /// Mentor note derived from the review.
    pub feedback_note: String,
}

/// Parameter object for reconstructing a persisted review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReviewData {
    /// Persisted review identifier.
    pub review_id: ReviewId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted submitter identity.
    pub username: Option<Username>,
    /// Persisted model review.
    pub review_data: ReviewData,
    /// Persisted mentor note.
    pub feedback_note: String,
    /// Persisted follow-up task.
    pub next_task: Option<NextTask>,
    /// Persisted admin feedback.
    pub feedback: Option<RecordedFeedback>,
    /// Persisted lifecycle status.
    pub status: ReviewStatus,
    /// Persisted creation timestamp.
    pub timestamp: DateTime<Utc>,
}

impl ReviewRecord {
    /// Creates a new review awaiting admin feedback.
    #[must_use]
    pub fn new(review: NewReview, clock: &impl Clock) -> Self {
        Self {
            review_id: ReviewId::new(),
            task_id: review.task_id,
            username: review.username,
            review_data: review.review_data,
            feedback_note: review.feedback_note,
            next_task: None,
            feedback: None,
            status: ReviewStatus::PendingFeedback,
            timestamp: clock.utc(),
        }
    }

    /// Reconstructs a review from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::InconsistentRecord`] when the stored
    /// fields violate the lifecycle invariants.
    pub fn from_persisted(data: PersistedReviewData) -> Result<Self, ReviewDomainError> {
        let scored = data.status == ReviewStatus::FeedbackProvided;
        if data.next_task.is_some() && !scored {
            return Err(ReviewDomainError::InconsistentRecord {
                review_id: data.review_id,
                reason: "next task present before feedback",
            });
        }
        if data.feedback.is_some() != scored {
            return Err(ReviewDomainError::InconsistentRecord {
                review_id: data.review_id,
                reason: "feedback presence does not match status",
            });
        }

        Ok(Self {
            review_id: data.review_id,
            task_id: data.task_id,
            username: data.username,
            review_data: data.review_data,
            feedback_note: data.feedback_note,
            next_task: data.next_task,
            feedback: data.feedback,
            status: data.status,
            timestamp: data.timestamp,
        })
    }

    /// Returns the review identifier.
    #[must_use]
    pub const fn id(&self) -> ReviewId {
        self.review_id
    }

    /// Returns the reviewed task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the submitter identity, if any.
    #[must_use]
    pub const fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    /// Returns the model review.
    #[must_use]
    pub const fn review_data(&self) -> &ReviewData {
        &self.review_data
    }

    /// Returns the mentor note.
    #[must_use]
    pub fn feedback_note(&self) -> &str {
        &self.feedback_note
    }

    /// Returns the follow-up task, once generated.
    #[must_use]
    pub const fn next_task(&self) -> Option<&NextTask> {
        self.next_task.as_ref()
    }

    /// Returns the admin feedback, once recorded.
    #[must_use]
    pub const fn feedback(&self) -> Option<&RecordedFeedback> {
        self.feedback.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReviewStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Records admin feedback and advances the review to
    /// [`ReviewStatus::FeedbackProvided`].
    ///
    /// Recording feedback again overwrites the previous feedback.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::InvalidStatusTransition`] when the
    /// lifecycle forbids the change.
    pub fn record_feedback(
        &mut self,
        feedback: AdminFeedback,
    ) -> Result<ReviewPatch, ReviewDomainError> {
        let target = ReviewStatus::FeedbackProvided;
        if !self.status.can_transition_to(target) {
            return Err(ReviewDomainError::InvalidStatusTransition {
                review_id: self.review_id,
                from: self.status,
                to: target,
            });
        }

        let recorded = RecordedFeedback::score(feedback, self.review_data.score);
        let patch = ReviewPatch::Feedback {
            feedback: recorded,
            status: target,
        };
        self.apply_patch(&patch);
        Ok(patch)
    }

    /// Checks that a follow-up task may be generated for this review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::NextTaskLocked`] until admin feedback
    /// has been recorded.
    pub const fn ensure_next_task_unlocked(&self) -> Result<(), ReviewDomainError> {
        if self.status.permits_next_task() {
            Ok(())
        } else {
            Err(ReviewDomainError::NextTaskLocked {
                review_id: self.review_id,
                status: self.status,
            })
        }
    }

    /// Stores a generated follow-up task.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::NextTaskLocked`] until admin feedback
    /// has been recorded.
    pub fn assign_next_task(
        &mut self,
        next_task: NextTask,
    ) -> Result<ReviewPatch, ReviewDomainError> {
        self.ensure_next_task_unlocked()?;
        let patch = ReviewPatch::NextTask(next_task);
        self.apply_patch(&patch);
        Ok(patch)
    }

    /// Applies a partial update produced by one of the guarded operations.
    pub(crate) fn apply_patch(&mut self, patch: &ReviewPatch) {
        match patch {
            ReviewPatch::Feedback { feedback, status } => {
                self.feedback = Some(*feedback);
                self.status = *status;
            }
            ReviewPatch::NextTask(next_task) => {
                self.next_task = Some(next_task.clone());
            }
        }
    }
}
