//! Partial updates applied to a stored review record.

use super::{NextTask, RecordedFeedback, ReviewStatus};

/// Column-subset update for an existing review.
///
/// Patches are produced by [`super::ReviewRecord`] after its lifecycle
/// guards pass, then applied by a repository keyed on the review id. Fields
/// outside the patch are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewPatch {
    /// Sets the admin feedback fields and the resulting status.
    Feedback {
        /// Feedback with its derived overall score.
        feedback: RecordedFeedback,
        /// Status after recording the feedback.
        status: ReviewStatus,
    },
    /// Sets the generated follow-up task.
    NextTask(NextTask),
}
