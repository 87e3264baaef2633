//! Task store behaviour through the gateway.

use super::helpers::{API_KEY, Harness, harness, seed_task};
use assessor::gateway::ErrorKind;
use assessor::task::services::CreateTaskRequest;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_are_listed_after_creation(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { gateway, .. } = harness;
    seed_task(&gateway).await?;
    gateway
        .create_task(
            API_KEY,
            CreateTaskRequest::new("cli-task-2", "Second", "Another brief."),
        )
        .await?;

    let tasks = gateway.list_tasks(API_KEY).await?;
    let keys: Vec<&str> = tasks.iter().map(|task| task.id().as_str()).collect();
    eyre::ensure!(keys.len() == 2, "expected two tasks, got {keys:?}");
    eyre::ensure!(keys.contains(&"refactor-01"), "seeded task missing");
    eyre::ensure!(keys.contains(&"cli-task-2"), "created task missing");
    Ok(())
}

#[rstest]
#[case(CreateTaskRequest::new("refactor-01", "Clash", "dup"), ErrorKind::DuplicateTask)]
#[case(CreateTaskRequest::new("   ", "Blank id", "d"), ErrorKind::ValidationError)]
#[case(CreateTaskRequest::new("t-3", "  ", "d"), ErrorKind::ValidationError)]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_tasks_are_rejected(
    harness: Harness,
    #[case] request: CreateTaskRequest,
    #[case] expected: ErrorKind,
) -> Result<(), eyre::Report> {
    let Harness { gateway, .. } = harness;
    seed_task(&gateway).await?;

    let result = gateway.create_task(API_KEY, request).await;

    eyre::ensure!(
        result.as_ref().err().map(assessor::gateway::ApiError::kind) == Some(expected),
        "expected {expected}, got {result:?}"
    );
    eyre::ensure!(
        gateway.list_tasks(API_KEY).await?.len() == 1,
        "rejected task must not be stored"
    );
    Ok(())
}
