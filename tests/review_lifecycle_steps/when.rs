//! When steps for review lifecycle BDD scenarios.

use super::world::{API_KEY, ReviewLifecycleWorld, run_async};
use assessor::review::services::RecordFeedbackRequest;
use rstest_bdd_macros::when;

#[when(
    r#"the admin records "{sentiment}" feedback with dignity {dignity:i64}, honesty {honesty:i64} and integrity {integrity:i64}"#
)]
fn admin_records_feedback(
    world: &mut ReviewLifecycleWorld,
    sentiment: String,
    dignity: i64,
    honesty: i64,
    integrity: i64,
) -> Result<(), eyre::Report> {
    let review_id = world.review_id()?;
    let request = RecordFeedbackRequest::new(sentiment, dignity, honesty, integrity);
    let result = run_async(world.gateway.record_feedback(API_KEY, &review_id, &request));
    world.record(result);
    Ok(())
}

#[when("the next task is requested")]
fn next_task_requested(world: &mut ReviewLifecycleWorld) -> Result<(), eyre::Report> {
    let review_id = world.review_id()?;
    let result = run_async(world.gateway.generate_next_task(API_KEY, &review_id));
    world.record(result);
    Ok(())
}
