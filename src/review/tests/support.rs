//! Shared mocks and builders for review tests.

use crate::review::{
    domain::{NewReview, ReviewData, ReviewRecord, ReviewScore},
    ports::{
        CompletionOutput, CompletionRequest, ContentFetcher, FetchError, ModelResult, ModelService,
    },
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    ports::TaskRepository,
};
use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::mock;
use serde_json::{Value, json};

mock! {
    pub Model {}

    #[async_trait]
    impl ModelService for Model {
        async fn complete(&self, request: &CompletionRequest) -> ModelResult<CompletionOutput>;
    }
}

mock! {
    pub Fetcher {}

    #[async_trait]
    impl ContentFetcher for Fetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
    }
}

pub const TASK_KEY: &str = "refactor-01";

pub fn review_document(score: i64) -> Value {
    json!({
        "task_id": TASK_KEY,
        "score": score,
        "done_well": ["clear naming"],
        "missing": ["tests"],
        "submission_summary": "A tidy refactor."
    })
}

pub fn next_task_document() -> Value {
    json!({
        "title": "Add tests",
        "objectives": ["cover edge cases", "cover failures"],
        "deliverables": "A test module."
    })
}

pub fn review_data(score: i64) -> ReviewData {
    ReviewData {
        task_id: TASK_KEY.to_owned(),
        score: ReviewScore::new(score).expect("valid score"),
        done_well: vec!["clear naming".to_owned()],
        missing: vec!["tests".to_owned()],
        submission_summary: "A tidy refactor.".to_owned(),
    }
}

pub fn task_id() -> TaskId {
    TaskId::new(TASK_KEY).expect("valid task id")
}

pub fn pending_review(score: i64) -> ReviewRecord {
    ReviewRecord::new(
        NewReview {
            task_id: task_id(),
            username: None,
            review_data: review_data(score),
            feedback_note: "Keep going.".to_owned(),
        },
        &DefaultClock,
    )
}

pub async fn seeded_tasks() -> InMemoryTaskRepository {
    let tasks = InMemoryTaskRepository::new();
    let task = Task::new(
        task_id(),
        "Refactor for Efficiency",
        "Make the function memory-efficient.",
        &DefaultClock,
    )
    .expect("valid task");
    tasks.store(&task).await.expect("task store should succeed");
    tasks
}
