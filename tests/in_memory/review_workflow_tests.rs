//! End-to-end review workflow over in-memory stores.

use super::helpers::{
    API_KEY, Harness, ScriptedModel, StaticFetcher, harness, harness_with, seed_task,
};
use assessor::gateway::{ApiError, ErrorKind, SubmitReviewRequest};
use assessor::review::{
    domain::{ReviewRecord, ReviewStatus},
    ports::OutputShape,
    services::{RecordFeedbackRequest, Submission},
};
use rstest::rstest;
use serde_json::json;

fn text_submission(body: &str) -> SubmitReviewRequest {
    SubmitReviewRequest::new("refactor-01", Submission::Text(body.to_owned()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_feedback_and_next_task(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { gateway, model, .. } = harness;
    seed_task(&gateway).await?;

    let created = gateway
        .submit_review(API_KEY, text_submission("for item in items: total += item"))
        .await?;
    eyre::ensure!(
        created.status() == ReviewStatus::PendingFeedback,
        "new review should await feedback"
    );
    eyre::ensure!(created.next_task().is_none(), "next task must start absent");
    let id = created.id().to_string();

    let locked = gateway.generate_next_task(API_KEY, &id).await;
    eyre::ensure!(
        locked.as_ref().err().map(ApiError::kind) == Some(ErrorKind::Locked),
        "next task should be locked before feedback, got {locked:?}"
    );

    let scored = gateway
        .record_feedback(API_KEY, &id, &RecordFeedbackRequest::new("up", 8, 9, 10))
        .await?;
    let document = serde_json::to_value(&scored)?;
    eyre::ensure!(
        document.get("overall_score") == Some(&json!(8.5)),
        "overall score should be 8.5, got {document}"
    );

    let advanced = gateway.generate_next_task(API_KEY, &id).await?;
    let next = advanced
        .next_task()
        .ok_or_else(|| eyre::eyre!("next task missing after generation"))?;
    eyre::ensure!(next.title == "Validate inputs", "unexpected next task");
    eyre::ensure!(
        advanced.feedback() == scored.feedback(),
        "next task generation must not disturb feedback"
    );

    let shapes: Vec<Option<OutputShape>> = model.calls().iter().map(|call| call.shape()).collect();
    eyre::ensure!(
        shapes == vec![Some(OutputShape::ReviewData), None, Some(OutputShape::NextTask)],
        "unexpected model call sequence {shapes:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_feedback_is_last_write_wins(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { gateway, .. } = harness;
    seed_task(&gateway).await?;
    let created = gateway.submit_review(API_KEY, text_submission("code")).await?;
    let id = created.id().to_string();

    gateway
        .record_feedback(API_KEY, &id, &RecordFeedbackRequest::new("up", 10, 10, 10))
        .await?;
    let second = gateway
        .record_feedback(API_KEY, &id, &RecordFeedbackRequest::new("down", 1, 1, 1))
        .await?;

    let stored = gateway.get_review(API_KEY, &id).await?;
    eyre::ensure!(stored == second, "stored record should match the last write");
    eyre::ensure!(
        stored.status() == ReviewStatus::FeedbackProvided,
        "status must stay feedback_provided"
    );
    let overall = stored
        .feedback()
        .map(|feedback| feedback.overall_score().to_string());
    eyre::ensure!(overall.as_deref() == Some("2.50"), "got {overall:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn model_failure_leaves_no_record() -> Result<(), eyre::Report> {
    let Harness { gateway, reviews, .. } =
        harness_with(ScriptedModel::failing(), StaticFetcher::default());
    seed_task(&gateway).await?;

    let result = gateway.submit_review(API_KEY, text_submission("code")).await;

    eyre::ensure!(
        result.as_ref().err().map(|err| err.status_code()) == Some(500),
        "model failure should surface as 500, got {result:?}"
    );
    eyre::ensure!(reviews.is_empty()?, "no record may be written");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_track_status_and_submitter(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { gateway, .. } = harness;
    seed_task(&gateway).await?;

    let ada = gateway
        .submit_review(API_KEY, text_submission("a").with_username("ada"))
        .await?;
    let grace = gateway
        .submit_review(API_KEY, text_submission("b").with_username("grace"))
        .await?;
    gateway
        .submit_review(API_KEY, text_submission("c").with_username("ada"))
        .await?;
    gateway
        .record_feedback(
            API_KEY,
            &grace.id().to_string(),
            &RecordFeedbackRequest::new("up", 5, 5, 5),
        )
        .await?;

    let pending = gateway.pending_reviews(API_KEY).await?;
    eyre::ensure!(pending.len() == 2, "expected two pending reviews");
    eyre::ensure!(
        pending.iter().all(|review| review.status() == ReviewStatus::PendingFeedback),
        "pending listing must only contain pending reviews"
    );

    let mine = gateway.user_reviews(API_KEY, "ada").await?;
    eyre::ensure!(mine.len() == 2, "ada submitted two reviews");
    eyre::ensure!(
        mine.first().map(ReviewRecord::id) == Some(ada.id()),
        "user reviews should be ordered oldest first"
    );
    Ok(())
}
