//! Diesel row models for review persistence.

use super::schema::reviews;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for review records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    /// Review identifier.
    pub id: uuid::Uuid,
    /// Reviewed task identifier.
    pub task_key: String,
    /// Submitter identity.
    pub username: Option<String>,
    /// Structured model review JSON.
    pub review_data: Value,
    /// Mentor note.
    pub feedback_note: String,
    /// Follow-up task JSON.
    pub next_task: Option<Value>,
    /// Admin verdict.
    pub feedback_sentiment: Option<String>,
    /// DHI scores JSON.
    pub dhi_scores: Option<Value>,
    /// Overall score in hundredths.
    pub overall_score_hundredths: Option<i32>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for review records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow {
    /// Review identifier.
    pub id: uuid::Uuid,
    /// Reviewed task identifier.
    pub task_key: String,
    /// Submitter identity.
    pub username: Option<String>,
    /// Structured model review JSON.
    pub review_data: Value,
    /// Mentor note.
    pub feedback_note: String,
    /// Follow-up task JSON.
    pub next_task: Option<Value>,
    /// Admin verdict.
    pub feedback_sentiment: Option<String>,
    /// DHI scores JSON.
    pub dhi_scores: Option<Value>,
    /// Overall score in hundredths.
    pub overall_score_hundredths: Option<i32>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
