//! Submission resolution through the gateway.

use super::helpers::{API_KEY, Harness, ScriptedModel, StaticFetcher, harness_with, seed_task};
use assessor::gateway::{ErrorKind, SubmitReviewRequest};
use assessor::review::services::Submission;
use rstest::rstest;

const RAW_URL: &str = "https://raw.githubusercontent.com/u/r/main/f.py";

fn harness() -> Harness {
    harness_with(
        ScriptedModel::scoring(6),
        StaticFetcher::default().with(RAW_URL, b"def f():\n    return 1\n"),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn github_link_is_read_from_raw_host() -> Result<(), eyre::Report> {
    let Harness { gateway, model, .. } = harness();
    seed_task(&gateway).await?;

    gateway
        .submit_review(
            API_KEY,
            SubmitReviewRequest::new(
                "refactor-01",
                Submission::Link("https://github.com/u/r/blob/main/f.py".to_owned()),
            ),
        )
        .await?;

    let calls = model.calls();
    let prompt = calls
        .first()
        .map(assessor::review::ports::CompletionRequest::prompt)
        .ok_or_else(|| eyre::eyre!("model was not called"))?;
    eyre::ensure!(
        prompt.contains("return 1"),
        "fetched body should reach the review prompt"
    );
    Ok(())
}

#[rstest]
#[case(Submission::File(vec![0xff, 0xfe, 0xfd]), ErrorKind::DecodeError)]
#[case(
    Submission::Link("https://github.com/u/r/blob/main/missing.py".to_owned()),
    ErrorKind::FetchError
)]
#[tokio::test(flavor = "multi_thread")]
async fn unresolvable_submissions_store_nothing(
    #[case] submission: Submission,
    #[case] expected: ErrorKind,
) -> Result<(), eyre::Report> {
    let Harness {
        gateway,
        reviews,
        model,
    } = harness();
    seed_task(&gateway).await?;

    let result = gateway
        .submit_review(API_KEY, SubmitReviewRequest::new("refactor-01", submission))
        .await;

    eyre::ensure!(
        result.as_ref().err().map(assessor::gateway::ApiError::kind) == Some(expected),
        "expected {expected}, got {result:?}"
    );
    eyre::ensure!(reviews.is_empty()?, "no record may be written");
    eyre::ensure!(model.calls().is_empty(), "model must not be called");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn utf8_file_is_reviewed() -> Result<(), eyre::Report> {
    let Harness { gateway, reviews, .. } = harness();
    seed_task(&gateway).await?;

    let record = gateway
        .submit_review(
            API_KEY,
            SubmitReviewRequest::new("refactor-01", Submission::File(b"x = 1\n".to_vec())),
        )
        .await?;

    eyre::ensure!(reviews.len()? == 1, "one record expected");
    eyre::ensure!(record.review_data().score.value() == 6, "scripted score");
    Ok(())
}
