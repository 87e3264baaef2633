//! Application services for the review workflow.

mod completion;
mod engine;
mod feedback;
mod prompts;
mod submission;

pub use engine::{ReviewEngine, ReviewEngineError, ReviewEngineResult, RunReviewRequest};
pub use feedback::{FeedbackAggregator, FeedbackError, FeedbackResult, RecordFeedbackRequest};
pub use prompts::PromptError;
pub use submission::{Submission, SubmissionError, SubmissionResolver, raw_content_url};
