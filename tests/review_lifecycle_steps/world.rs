//! Shared world state for review lifecycle BDD scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use assessor::gateway::{AdminGuard, ApiError, ApiKeyGuard, GatewayAdapters, ReviewGateway};
use assessor::review::{
    adapters::memory::InMemoryReviewRepository,
    domain::ReviewRecord,
    ports::{
        CompletionOutput, CompletionRequest, ContentFetcher, FetchError, ModelResult,
        ModelService, OutputShape,
    },
};
use assessor::task::adapters::memory::InMemoryTaskRepository;
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::json;

/// API key used by every scenario request.
pub const API_KEY: Option<&str> = Some("bdd-key");

/// Model returning a configurable score and fixed text.
#[derive(Debug, Default)]
pub struct FixedModel {
    score: AtomicI64,
}

impl FixedModel {
    /// Sets the score reported for subsequent reviews.
    pub fn set_score(&self, score: i64) {
        self.score.store(score, Ordering::SeqCst);
    }
}

#[async_trait]
impl ModelService for FixedModel {
    async fn complete(&self, request: &CompletionRequest) -> ModelResult<CompletionOutput> {
        Ok(match request.shape() {
            Some(OutputShape::ReviewData) => CompletionOutput::Structured(json!({
                "task_id": "refactor-01",
                "score": self.score.load(Ordering::SeqCst),
                "done_well": ["works"],
                "missing": ["tests"],
                "submission_summary": "Scenario submission."
            })),
            Some(OutputShape::NextTask) => CompletionOutput::Structured(json!({
                "title": "Write tests",
                "objectives": ["cover the happy path"],
                "deliverables": "A test module."
            })),
            None => CompletionOutput::Text("Keep going.".to_owned()),
        })
    }
}

/// Fetcher for scenarios that never submit links.
#[derive(Debug, Default)]
pub struct NoFetcher;

#[async_trait]
impl ContentFetcher for NoFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::Status {
            url: url.to_owned(),
            status: 404,
        })
    }
}

/// Gateway type used by the BDD world.
pub type TestGateway = ReviewGateway<
    InMemoryTaskRepository,
    InMemoryReviewRepository,
    FixedModel,
    NoFetcher,
    DefaultClock,
>;

/// Scenario world for review lifecycle behaviour tests.
pub struct ReviewLifecycleWorld {
    pub gateway: TestGateway,
    pub model: Arc<FixedModel>,
    pub review: Option<ReviewRecord>,
    pub last_error: Option<ApiError>,
}

impl ReviewLifecycleWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let model = Arc::new(FixedModel::default());
        let gateway = ReviewGateway::new(
            ApiKeyGuard::new("bdd-key"),
            AdminGuard::new(None),
            GatewayAdapters {
                tasks: Arc::new(InMemoryTaskRepository::new()),
                reviews: Arc::new(InMemoryReviewRepository::new()),
                model: Arc::clone(&model),
                fetcher: Arc::new(NoFetcher),
                clock: Arc::new(DefaultClock),
            },
        );

        Self {
            gateway,
            model,
            review: None,
            last_error: None,
        }
    }

    /// Returns the identifier of the scenario's review.
    ///
    /// # Errors
    ///
    /// Returns an error when no review has been created yet.
    pub fn review_id(&self) -> Result<String, eyre::Report> {
        self.review
            .as_ref()
            .map(|review| review.id().to_string())
            .ok_or_else(|| eyre::eyre!("missing review in scenario world"))
    }

    /// Records the outcome of a gateway call.
    pub fn record(&mut self, result: Result<ReviewRecord, ApiError>) {
        match result {
            Ok(review) => {
                self.review = Some(review);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
    }
}

impl Default for ReviewLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReviewLifecycleWorld {
    ReviewLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
