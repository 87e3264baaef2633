//! Review engine: model-driven review creation and follow-up generation.

use super::completion::{complete_structured, complete_text};
use super::prompts::{self, PromptError};
use crate::review::{
    domain::{
        NewReview, NextTask, ReviewData, ReviewDomainError, ReviewId, ReviewRecord, ReviewStatus,
        Username,
    },
    ports::{ModelError, ModelService, OutputShape, ReviewRepository, ReviewRepositoryError},
};
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for reviewing a resolved submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReviewRequest {
    task_id: TaskId,
    submission_text: String,
    username: Option<Username>,
}

impl RunReviewRequest {
    /// Creates an anonymous review request.
    #[must_use]
    pub fn new(task_id: TaskId, submission_text: impl Into<String>) -> Self {
        Self {
            task_id,
            submission_text: submission_text.into(),
            username: None,
        }
    }

    /// Attributes the submission to a user.
    #[must_use]
    pub fn with_username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }
}

/// Service-level errors for review engine operations.
#[derive(Debug, Error)]
pub enum ReviewEngineError {
    /// The referenced task does not exist.
    #[error("task with id '{0}' not found")]
    TaskNotFound(TaskId),

    /// The referenced review does not exist.
    #[error("review with id '{0}' not found")]
    ReviewNotFound(ReviewId),

    /// The review has not been unlocked by admin feedback.
    #[error("review {review_id} is locked in status {status}; admin feedback is required first")]
    Locked {
        /// Locked review.
        review_id: ReviewId,
        /// Current status.
        status: ReviewStatus,
    },

    /// The model call failed or returned unusable output.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A prompt could not be rendered.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(ReviewDomainError),

    /// Task lookup failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),

    /// Review persistence failed.
    #[error(transparent)]
    Repository(ReviewRepositoryError),
}

impl From<ReviewRepositoryError> for ReviewEngineError {
    fn from(err: ReviewRepositoryError) -> Self {
        match err {
            ReviewRepositoryError::NotFound(id) => Self::ReviewNotFound(id),
            other => Self::Repository(other),
        }
    }
}

impl From<ReviewDomainError> for ReviewEngineError {
    fn from(err: ReviewDomainError) -> Self {
        match err {
            ReviewDomainError::NextTaskLocked { review_id, status } => {
                Self::Locked { review_id, status }
            }
            other => Self::Domain(other),
        }
    }
}

/// Result type for review engine operations.
pub type ReviewEngineResult<T> = Result<T, ReviewEngineError>;

/// Drives the model calls of the review workflow and persists the outcome.
#[derive(Clone)]
pub struct ReviewEngine<T, R, M, C>
where
    T: TaskRepository,
    R: ReviewRepository,
    M: ModelService,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    reviews: Arc<R>,
    model: Arc<M>,
    clock: Arc<C>,
}

impl<T, R, M, C> ReviewEngine<T, R, M, C>
where
    T: TaskRepository,
    R: ReviewRepository,
    M: ModelService,
    C: Clock + Send + Sync,
{
    /// Creates a new review engine.
    #[must_use]
    pub const fn new(tasks: Arc<T>, reviews: Arc<R>, model: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            reviews,
            model,
            clock,
        }
    }

    /// Reviews a submission and stores the resulting record.
    ///
    /// The structured review and the mentor note are both obtained before
    /// anything is written, so a failed run leaves no record behind and
    /// may be retried as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewEngineError::TaskNotFound`] for unknown tasks,
    /// [`ReviewEngineError::Model`] when either model call fails, and
    /// repository errors when persistence fails.
    pub async fn run_review(&self, request: RunReviewRequest) -> ReviewEngineResult<ReviewRecord> {
        let RunReviewRequest {
            task_id,
            submission_text,
            username,
        } = request;

        let task = self
            .tasks
            .find_by_id(&task_id)
            .await?
            .ok_or_else(|| ReviewEngineError::TaskNotFound(task_id.clone()))?;

        let review_prompt =
            prompts::review_prompt(task.id().as_str(), task.description(), &submission_text)?;
        let review_data: ReviewData =
            complete_structured(&*self.model, review_prompt, OutputShape::ReviewData)
                .await
                .inspect_err(|err| warn!(task_id = %task_id, error = %err, "review call failed"))?;

        let note_prompt = prompts::note_prompt(&review_data)?;
        let feedback_note = complete_text(&*self.model, note_prompt)
            .await
            .inspect_err(|err| warn!(task_id = %task_id, error = %err, "note call failed"))?;

        let record = ReviewRecord::new(
            NewReview {
                task_id,
                username,
                review_data,
                feedback_note,
            },
            &*self.clock,
        );
        self.reviews.store(&record).await?;
        info!(
            review_id = %record.id(),
            task_id = %record.task_id(),
            score = record.review_data().score.value(),
            "review created"
        );
        Ok(record)
    }

    /// Generates and stores the follow-up task for a scored review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewEngineError::ReviewNotFound`] for unknown reviews,
    /// [`ReviewEngineError::Locked`] until admin feedback has been
    /// recorded, and [`ReviewEngineError::Model`] when the model call fails.
    pub async fn run_next_task(&self, review_id: ReviewId) -> ReviewEngineResult<ReviewRecord> {
        let mut record = self.load(review_id).await?;
        record.ensure_next_task_unlocked()?;

        let prompt = prompts::next_task_prompt(record.review_data())?;
        let next_task: NextTask = complete_structured(&*self.model, prompt, OutputShape::NextTask)
            .await
            .inspect_err(|err| {
                warn!(review_id = %review_id, error = %err, "next task call failed");
            })?;

        let patch = record.assign_next_task(next_task)?;
        self.reviews.update(review_id, &patch).await?;
        info!(review_id = %review_id, "next task generated");
        self.load(review_id).await
    }

    /// Retrieves a review by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewEngineError::ReviewNotFound`] when the review does
    /// not exist.
    pub async fn get(&self, review_id: ReviewId) -> ReviewEngineResult<ReviewRecord> {
        self.load(review_id).await
    }

    /// Lists reviews awaiting admin feedback, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewEngineError::Repository`] when the lookup fails.
    pub async fn pending_reviews(&self) -> ReviewEngineResult<Vec<ReviewRecord>> {
        Ok(self
            .reviews
            .find_by_status(ReviewStatus::PendingFeedback)
            .await?)
    }

    /// Lists a user's reviews, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewEngineError::Repository`] when the lookup fails.
    pub async fn reviews_for(&self, username: &Username) -> ReviewEngineResult<Vec<ReviewRecord>> {
        Ok(self.reviews.find_by_username(username).await?)
    }

    async fn load(&self, review_id: ReviewId) -> ReviewEngineResult<ReviewRecord> {
        self.reviews
            .find_by_id(review_id)
            .await?
            .ok_or(ReviewEngineError::ReviewNotFound(review_id))
    }
}
