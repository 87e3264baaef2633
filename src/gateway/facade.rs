//! Operation facade over the task store and review services.

use super::{AdminGuard, ApiError, ApiKeyGuard};
use crate::review::{
    domain::{ReviewId, ReviewRecord, Username},
    ports::{ContentFetcher, ModelService, ReviewRepository},
    services::{
        FeedbackAggregator, RecordFeedbackRequest, ReviewEngine, RunReviewRequest, Submission,
        SubmissionResolver,
    },
};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskCatalogService},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Adapter handles shared by the gateway's services.
pub struct GatewayAdapters<T, R, M, F, C> {
    /// Task store.
    pub tasks: Arc<T>,
    /// Review store.
    pub reviews: Arc<R>,
    /// Text-completion model.
    pub model: Arc<M>,
    /// Link fetcher.
    pub fetcher: Arc<F>,
    /// Clock for creation timestamps.
    pub clock: Arc<C>,
}

/// Request payload for submitting work for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReviewRequest {
    task_id: String,
    submission: Submission,
    username: Option<String>,
}

impl SubmitReviewRequest {
    /// Creates an anonymous submission.
    #[must_use]
    pub fn new(task_id: impl Into<String>, submission: Submission) -> Self {
        Self {
            task_id: task_id.into(),
            submission,
            username: None,
        }
    }

    /// Attributes the submission to a user.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Authorized entry point for every workflow operation.
///
/// Each operation takes the caller's API key first and rejects the call
/// with `unauthorized` before touching any service.
pub struct ReviewGateway<T, R, M, F, C>
where
    T: TaskRepository,
    R: ReviewRepository,
    M: ModelService,
    F: ContentFetcher,
    C: Clock + Send + Sync,
{
    api_key: ApiKeyGuard,
    admin: AdminGuard,
    catalog: TaskCatalogService<T, C>,
    resolver: SubmissionResolver<F>,
    engine: ReviewEngine<T, R, M, C>,
    feedback: FeedbackAggregator<R>,
}

impl<T, R, M, F, C> ReviewGateway<T, R, M, F, C>
where
    T: TaskRepository,
    R: ReviewRepository,
    M: ModelService,
    F: ContentFetcher,
    C: Clock + Send + Sync,
{
    /// Wires the services over the given adapters.
    #[must_use]
    pub fn new(
        api_key: ApiKeyGuard,
        admin: AdminGuard,
        adapters: GatewayAdapters<T, R, M, F, C>,
    ) -> Self {
        let GatewayAdapters {
            tasks,
            reviews,
            model,
            fetcher,
            clock,
        } = adapters;
        Self {
            api_key,
            admin,
            catalog: TaskCatalogService::new(Arc::clone(&tasks), Arc::clone(&clock)),
            resolver: SubmissionResolver::new(fetcher),
            engine: ReviewEngine::new(tasks, Arc::clone(&reviews), model, clock),
            feedback: FeedbackAggregator::new(reviews),
        }
    }

    /// Checks an admin password.
    ///
    /// # Errors
    ///
    /// Returns `unauthorized` for a bad API key, a wrong password, or when
    /// admin login is disabled.
    pub fn admin_login(&self, api_key: Option<&str>, password: &str) -> Result<(), ApiError> {
        self.api_key.authorize(api_key)?;
        self.admin.login(password)?;
        info!("admin login accepted");
        Ok(())
    }

    /// Creates a task definition.
    ///
    /// # Errors
    ///
    /// Returns `validation_error` for a blank identifier or title and
    /// `duplicate_task` when the identifier is taken.
    pub async fn create_task(
        &self,
        api_key: Option<&str>,
        request: CreateTaskRequest,
    ) -> Result<Task, ApiError> {
        self.api_key.authorize(api_key)?;
        Ok(self.catalog.create(request).await?)
    }

    /// Lists all task definitions in creation order.
    ///
    /// # Errors
    ///
    /// Returns `persistence_error` when the store fails.
    pub async fn list_tasks(&self, api_key: Option<&str>) -> Result<Vec<Task>, ApiError> {
        self.api_key.authorize(api_key)?;
        Ok(self.catalog.list().await?)
    }

    /// Resolves a submission and reviews it against its task.
    ///
    /// # Errors
    ///
    /// Returns `decode_error` or `fetch_error` when the submission cannot
    /// be resolved, `task_not_found` for unknown tasks, and
    /// `model_invocation_error` or `parse_error` when the model fails.
    /// Nothing is stored on failure.
    pub async fn submit_review(
        &self,
        api_key: Option<&str>,
        request: SubmitReviewRequest,
    ) -> Result<ReviewRecord, ApiError> {
        self.api_key.authorize(api_key)?;
        let SubmitReviewRequest {
            task_id,
            submission,
            username,
        } = request;
        let task_key = TaskId::new(task_id)?;
        let submitter = username.map(Username::new).transpose()?;

        let submission_text = self.resolver.resolve(submission).await?;
        let run = RunReviewRequest::new(task_key, submission_text);
        let run_request = match submitter {
            Some(name) => run.with_username(name),
            None => run,
        };
        Ok(self.engine.run_review(run_request).await?)
    }

    /// Records admin feedback on a review.
    ///
    /// # Errors
    ///
    /// Returns `validation_error` for a malformed id, unknown sentiment or
    /// out-of-range DHI score, and `review_not_found` for unknown reviews.
    pub async fn record_feedback(
        &self,
        api_key: Option<&str>,
        review_id: &str,
        request: &RecordFeedbackRequest,
    ) -> Result<ReviewRecord, ApiError> {
        self.api_key.authorize(api_key)?;
        let id = ReviewId::parse(review_id)?;
        Ok(self.feedback.record_feedback(id, request).await?)
    }

    /// Generates the follow-up task for a scored review.
    ///
    /// # Errors
    ///
    /// Returns `locked` until feedback has been recorded and
    /// `review_not_found` for unknown reviews.
    pub async fn generate_next_task(
        &self,
        api_key: Option<&str>,
        review_id: &str,
    ) -> Result<ReviewRecord, ApiError> {
        self.api_key.authorize(api_key)?;
        let id = ReviewId::parse(review_id)?;
        Ok(self.engine.run_next_task(id).await?)
    }

    /// Reads one review.
    ///
    /// # Errors
    ///
    /// Returns `review_not_found` for unknown reviews.
    pub async fn get_review(
        &self,
        api_key: Option<&str>,
        review_id: &str,
    ) -> Result<ReviewRecord, ApiError> {
        self.api_key.authorize(api_key)?;
        let id = ReviewId::parse(review_id)?;
        Ok(self.engine.get(id).await?)
    }

    /// Lists reviews awaiting admin feedback.
    ///
    /// # Errors
    ///
    /// Returns `persistence_error` when the store fails.
    pub async fn pending_reviews(
        &self,
        api_key: Option<&str>,
    ) -> Result<Vec<ReviewRecord>, ApiError> {
        self.api_key.authorize(api_key)?;
        Ok(self.engine.pending_reviews().await?)
    }

    /// Lists the reviews submitted by one user.
    ///
    /// # Errors
    ///
    /// Returns `validation_error` for a blank username.
    pub async fn user_reviews(
        &self,
        api_key: Option<&str>,
        username: &str,
    ) -> Result<Vec<ReviewRecord>, ApiError> {
        self.api_key.authorize(api_key)?;
        let user = Username::new(username)?;
        Ok(self.engine.reviews_for(&user).await?)
    }
}
