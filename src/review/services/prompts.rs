//! Prompt templates for the three model calls.

use crate::review::domain::ReviewData;
use minijinja::{Environment, context};
use thiserror::Error;

const REVIEW_TEMPLATE: &str = "\
ROLE: You are an expert code and task reviewer.
TASK: Compare the user's SUBMISSION against the original TASK DESCRIPTION. \
Score the submission from 0 to 10, list what was done well, list what is \
missing, and summarise the submission.
Respond with a JSON object with the fields task_id, score, done_well, \
missing and submission_summary.
---
ORIGINAL TASK DESCRIPTION:
{{ task_description }}
---
USER'S SUBMISSION:
{{ submission_text }}
---
Now, provide your structured review. For the 'task_id', use the following ID: {{ task_id }}";

const NOTE_TEMPLATE: &str = "\
ROLE: You are a supportive mentor providing feedback.
TASK: Write a short, 2-3 sentence feedback note for the person who made \
this submission. Be encouraging and specific.
---
REVIEW DATA:
- Score: {{ score }}/10
- What was done well: {{ done_well | join(\"; \") }}
- What to improve: {{ missing | join(\"; \") }}
---
Please generate the feedback note now:";

const NEXT_TASK_TEMPLATE: &str = "\
ROLE: You are an intelligent project manager.
TASK: Based on the following review, generate a new, logical follow-up task \
that builds on the strengths and addresses the gaps.
Respond with a JSON object with the fields title, objectives and deliverables.
---
PREVIOUS TASK REVIEW DATA:
- Score: {{ score }}/10
- What went well: {{ done_well | join(\"; \") }}
- What to improve: {{ missing | join(\"; \") }}
---
Now, generate the next task:";

/// Failure to render a prompt template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {template} prompt: {reason}")]
pub struct PromptError {
    /// Template name.
    pub template: &'static str,
    /// Rendering failure description.
    pub reason: String,
}

fn render(
    template_name: &'static str,
    source: &str,
    ctx: minijinja::Value,
) -> Result<String, PromptError> {
    Environment::new()
        .render_str(source, ctx)
        .map_err(|err| PromptError {
            template: template_name,
            reason: err.to_string(),
        })
}

/// Renders the structured review prompt.
///
/// # Errors
///
/// Returns [`PromptError`] when the template fails to render.
pub fn review_prompt(
    task_id: &str,
    task_description: &str,
    submission_text: &str,
) -> Result<String, PromptError> {
    render(
        "review",
        REVIEW_TEMPLATE,
        context! { task_id, task_description, submission_text },
    )
}

/// Renders the mentor note prompt.
///
/// # Errors
///
/// Returns [`PromptError`] when the template fails to render.
pub fn note_prompt(review: &ReviewData) -> Result<String, PromptError> {
    render(
        "note",
        NOTE_TEMPLATE,
        context! {
            score => review.score.value(),
            done_well => &review.done_well,
            missing => &review.missing,
        },
    )
}

/// Renders the follow-up task prompt.
///
/// # Errors
///
/// Returns [`PromptError`] when the template fails to render.
pub fn next_task_prompt(review: &ReviewData) -> Result<String, PromptError> {
    render(
        "next_task",
        NEXT_TASK_TEMPLATE,
        context! {
            score => review.score.value(),
            done_well => &review.done_well,
            missing => &review.missing,
        },
    )
}
