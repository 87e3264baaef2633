//! Then steps for review lifecycle BDD scenarios.

use super::world::{API_KEY, ReviewLifecycleWorld, run_async};
use assessor::review::domain::ReviewStatus;
use rstest_bdd_macros::then;

#[then(r#"the review status is "{status}""#)]
fn review_status_is(world: &ReviewLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = ReviewStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let review_id = world.review_id()?;
    let stored = run_async(world.gateway.get_review(API_KEY, &review_id))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then(r#"the overall score is "{score}""#)]
fn overall_score_is(world: &ReviewLifecycleWorld, score: String) -> Result<(), eyre::Report> {
    let review = world
        .review
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing review"))?;
    let actual = review
        .feedback()
        .map(|feedback| feedback.overall_score().to_string())
        .ok_or_else(|| eyre::eyre!("review has no overall score"))?;

    if actual != score {
        return Err(eyre::eyre!("expected overall score {score}, found {actual}"));
    }
    Ok(())
}

#[then("the review has a next task")]
fn review_has_next_task(world: &ReviewLifecycleWorld) -> Result<(), eyre::Report> {
    if let Some(err) = &world.last_error {
        return Err(eyre::eyre!("unexpected failure: {err}"));
    }
    let review = world
        .review
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing review"))?;
    if review.next_task().is_none() {
        return Err(eyre::eyre!("expected a next task on the review"));
    }
    Ok(())
}

#[then(r#"the request fails with "{kind}""#)]
fn request_fails_with(world: &ReviewLifecycleWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the last request to fail"))?;

    if err.kind().as_str() != kind {
        return Err(eyre::eyre!("expected {kind} failure, got {err}"));
    }
    Ok(())
}
