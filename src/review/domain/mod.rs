//! Domain model for review records and their lifecycle.
//!
//! A review record captures one model-assessed submission. It starts in
//! [`ReviewStatus::PendingFeedback`] and advances to
//! [`ReviewStatus::FeedbackProvided`] only when an admin records feedback.
//! Follow-up task generation is locked until then.

mod assessment;
mod error;
mod feedback;
mod ids;
mod patch;
mod record;
mod status;

pub use assessment::{NextTask, ReviewData, ReviewScore};
pub use error::{ParseReviewStatusError, ReviewDomainError};
pub use feedback::{AdminFeedback, DhiScores, OverallScore, RecordedFeedback, Sentiment};
pub use ids::{ReviewId, Username};
pub use patch::ReviewPatch;
pub use record::{NewReview, PersistedReviewData, ReviewRecord};
pub use status::ReviewStatus;
