//! Given steps for review lifecycle BDD scenarios.

use super::world::{API_KEY, ReviewLifecycleWorld, run_async};
use assessor::gateway::SubmitReviewRequest;
use assessor::review::services::Submission;
use assessor::task::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a task "{task_id}" asking to "{description}""#)]
fn task_exists(
    world: &mut ReviewLifecycleWorld,
    task_id: String,
    description: String,
) -> Result<(), eyre::Report> {
    run_async(world.gateway.create_task(
        API_KEY,
        CreateTaskRequest::new(task_id.clone(), task_id, description),
    ))
    .wrap_err("create task for lifecycle scenario")?;
    Ok(())
}

#[given("the model scores submissions {score:i64}")]
fn model_scores(world: &mut ReviewLifecycleWorld, score: i64) {
    world.model.set_score(score);
}

#[given(r#"the submission "{body}" has been reviewed"#)]
fn submission_reviewed(world: &mut ReviewLifecycleWorld, body: String) -> Result<(), eyre::Report> {
    let review = run_async(world.gateway.submit_review(
        API_KEY,
        SubmitReviewRequest::new("refactor-01", Submission::Text(body)),
    ))
    .wrap_err("submit review for lifecycle scenario")?;
    world.review = Some(review);
    Ok(())
}
