//! Shared fakes and fixtures for in-memory integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use assessor::gateway::{AdminGuard, ApiKeyGuard, GatewayAdapters, ReviewGateway};
use assessor::review::{
    adapters::memory::InMemoryReviewRepository,
    ports::{
        CompletionOutput, CompletionRequest, ContentFetcher, FetchError, ModelError, ModelResult,
        ModelService, OutputShape,
    },
};
use assessor::task::{adapters::memory::InMemoryTaskRepository, services::CreateTaskRequest};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::json;

/// API key accepted by the test gateway.
pub const API_KEY: Option<&str> = Some("integration-key");

/// Admin password accepted by the test gateway.
pub const ADMIN_PASSWORD: &str = "integration-admin";

/// Deterministic model: answers each output mode from fixed data.
#[derive(Debug)]
pub struct ScriptedModel {
    score: i64,
    failing: bool,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    /// Creates a model that reports the given technical score.
    #[must_use]
    pub fn scoring(score: i64) -> Self {
        Self {
            score,
            failing: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a model whose every call fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            score: 0,
            failing: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the call log lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("call log lock").clone()
    }
}

#[async_trait]
impl ModelService for ScriptedModel {
    async fn complete(&self, request: &CompletionRequest) -> ModelResult<CompletionOutput> {
        self.calls
            .lock()
            .map_err(|err| ModelError::Invocation(err.to_string()))?
            .push(request.clone());
        if self.failing {
            return Err(ModelError::Invocation("model unavailable".to_owned()));
        }
        Ok(match request.shape() {
            Some(OutputShape::ReviewData) => CompletionOutput::Structured(json!({
                "task_id": "refactor-01",
                "score": self.score,
                "done_well": ["clear structure"],
                "missing": ["input validation"],
                "submission_summary": "Refactors the loop into an iterator."
            })),
            Some(OutputShape::NextTask) => CompletionOutput::Structured(json!({
                "title": "Validate inputs",
                "objectives": ["reject empty input", "document errors"],
                "deliverables": "A validated function with tests."
            })),
            None => CompletionOutput::Text("Good progress; validate inputs next.".to_owned()),
        })
    }
}

/// Fetcher serving fixed bodies by URL.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    /// Adds a body served for `url`.
    #[must_use]
    pub fn with(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_owned(), body.to_vec());
        self
    }
}

#[async_trait]
impl ContentFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.bodies.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_owned(),
            status: 404,
        })
    }
}

/// Gateway over in-memory stores and the scripted fakes.
pub type TestGateway = ReviewGateway<
    InMemoryTaskRepository,
    InMemoryReviewRepository,
    ScriptedModel,
    StaticFetcher,
    DefaultClock,
>;

/// Handles kept alongside the gateway for assertions.
pub struct Harness {
    /// Gateway under test.
    pub gateway: TestGateway,
    /// Review store behind the gateway.
    pub reviews: Arc<InMemoryReviewRepository>,
    /// Model behind the gateway.
    pub model: Arc<ScriptedModel>,
}

/// Builds a harness from the given fakes.
#[must_use]
pub fn harness_with(model: ScriptedModel, fetcher: StaticFetcher) -> Harness {
    let reviews = Arc::new(InMemoryReviewRepository::new());
    let shared_model = Arc::new(model);
    let gateway = ReviewGateway::new(
        ApiKeyGuard::new("integration-key"),
        AdminGuard::new(Some(ADMIN_PASSWORD)),
        GatewayAdapters {
            tasks: Arc::new(InMemoryTaskRepository::new()),
            reviews: Arc::clone(&reviews),
            model: Arc::clone(&shared_model),
            fetcher: Arc::new(fetcher),
            clock: Arc::new(DefaultClock),
        },
    );
    Harness {
        gateway,
        reviews,
        model: shared_model,
    }
}

/// Provides a harness whose model scores submissions 7.
#[fixture]
pub fn harness() -> Harness {
    harness_with(ScriptedModel::scoring(7), StaticFetcher::default())
}

/// Creates the task every scenario reviews against.
///
/// # Errors
///
/// Returns an error when task creation fails.
pub async fn seed_task(gateway: &TestGateway) -> Result<(), eyre::Report> {
    gateway
        .create_task(
            API_KEY,
            CreateTaskRequest::new(
                "refactor-01",
                "Refactor for Efficiency",
                "Rewrite the loop so it does not allocate.",
            ),
        )
        .await?;
    Ok(())
}
