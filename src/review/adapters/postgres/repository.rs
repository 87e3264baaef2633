//! `PostgreSQL` repository implementation for review records.

use super::{
    models::{NewReviewRow, ReviewRow},
    schema::reviews,
};
use crate::review::{
    domain::{
        DhiScores, NextTask, OverallScore, PersistedReviewData, RecordedFeedback, ReviewData,
        ReviewId, ReviewPatch, ReviewRecord, ReviewStatus, Sentiment, Username,
    },
    ports::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult},
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL` connection pool type used by review adapters.
pub type ReviewPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed review repository.
#[derive(Debug, Clone)]
pub struct PostgresReviewRepository {
    pool: ReviewPgPool,
}

impl PostgresReviewRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ReviewPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ReviewRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ReviewRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ReviewRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ReviewRepositoryError::persistence)?
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn store(&self, review: &ReviewRecord) -> ReviewRepositoryResult<()> {
        let review_id = review.id();
        let new_row = to_new_row(review)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(reviews::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ReviewRepositoryError::DuplicateReview(review_id)
                    }
                    _ => ReviewRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ReviewId) -> ReviewRepositoryResult<Option<ReviewRecord>> {
        self.run_blocking(move |connection| {
            let row = reviews::table
                .filter(reviews::id.eq(id.into_inner()))
                .select(ReviewRow::as_select())
                .first::<ReviewRow>(connection)
                .optional()
                .map_err(ReviewRepositoryError::persistence)?;
            row.map(row_to_review).transpose()
        })
        .await
    }

    async fn update(&self, id: ReviewId, patch: &ReviewPatch) -> ReviewRepositoryResult<()> {
        let columns = PatchColumns::try_from(patch)?;

        self.run_blocking(move |connection| {
            let target = reviews::table.filter(reviews::id.eq(id.into_inner()));
            let matched = match columns {
                PatchColumns::Feedback {
                    sentiment,
                    dhi_scores,
                    overall_score_hundredths,
                    status,
                } => diesel::update(target)
                    .set((
                        reviews::feedback_sentiment.eq(Some(sentiment)),
                        reviews::dhi_scores.eq(Some(dhi_scores)),
                        reviews::overall_score_hundredths.eq(Some(overall_score_hundredths)),
                        reviews::status.eq(status),
                    ))
                    .execute(connection),
                PatchColumns::NextTask(next_task) => diesel::update(target)
                    .set(reviews::next_task.eq(Some(next_task)))
                    .execute(connection),
            }
            .map_err(ReviewRepositoryError::persistence)?;

            if matched == 0 {
                return Err(ReviewRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_status(
        &self,
        status: ReviewStatus,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>> {
        self.run_blocking(move |connection| {
            let rows = reviews::table
                .filter(reviews::status.eq(status.as_str()))
                .order(reviews::created_at.asc())
                .select(ReviewRow::as_select())
                .load::<ReviewRow>(connection)
                .map_err(ReviewRepositoryError::persistence)?;
            rows.into_iter().map(row_to_review).collect()
        })
        .await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>> {
        let name = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = reviews::table
                .filter(reviews::username.eq(name))
                .order(reviews::created_at.asc())
                .select(ReviewRow::as_select())
                .load::<ReviewRow>(connection)
                .map_err(ReviewRepositoryError::persistence)?;
            rows.into_iter().map(row_to_review).collect()
        })
        .await
    }
}

/// Column values written by a [`ReviewPatch`].
#[derive(Debug, Clone, PartialEq)]
enum PatchColumns {
    Feedback {
        sentiment: String,
        dhi_scores: Value,
        overall_score_hundredths: i32,
        status: String,
    },
    NextTask(Value),
}

impl TryFrom<&ReviewPatch> for PatchColumns {
    type Error = ReviewRepositoryError;

    fn try_from(patch: &ReviewPatch) -> Result<Self, Self::Error> {
        match patch {
            ReviewPatch::Feedback { feedback, status } => Ok(Self::Feedback {
                sentiment: feedback.sentiment().as_str().to_owned(),
                dhi_scores: serde_json::to_value(feedback.dhi_scores())
                    .map_err(ReviewRepositoryError::persistence)?,
                overall_score_hundredths: i32::try_from(feedback.overall_score().hundredths())
                    .map_err(ReviewRepositoryError::persistence)?,
                status: status.as_str().to_owned(),
            }),
            ReviewPatch::NextTask(next_task) => Ok(Self::NextTask(
                serde_json::to_value(next_task).map_err(ReviewRepositoryError::persistence)?,
            )),
        }
    }
}

fn to_new_row(review: &ReviewRecord) -> ReviewRepositoryResult<NewReviewRow> {
    let review_data =
        serde_json::to_value(review.review_data()).map_err(ReviewRepositoryError::persistence)?;
    let next_task = review
        .next_task()
        .map(serde_json::to_value)
        .transpose()
        .map_err(ReviewRepositoryError::persistence)?;
    let feedback = review.feedback().copied();
    let dhi_scores = feedback
        .map(|recorded| serde_json::to_value(recorded.dhi_scores()))
        .transpose()
        .map_err(ReviewRepositoryError::persistence)?;
    let overall_score_hundredths = feedback
        .map(|recorded| i32::try_from(recorded.overall_score().hundredths()))
        .transpose()
        .map_err(ReviewRepositoryError::persistence)?;

    Ok(NewReviewRow {
        id: review.id().into_inner(),
        task_key: review.task_id().as_str().to_owned(),
        username: review.username().map(|name| name.as_str().to_owned()),
        review_data,
        feedback_note: review.feedback_note().to_owned(),
        next_task,
        feedback_sentiment: feedback.map(|recorded| recorded.sentiment().as_str().to_owned()),
        dhi_scores,
        overall_score_hundredths,
        status: review.status().as_str().to_owned(),
        created_at: review.timestamp(),
    })
}

fn row_to_review(row: ReviewRow) -> ReviewRepositoryResult<ReviewRecord> {
    let ReviewRow {
        id,
        task_key,
        username,
        review_data: persisted_review_data,
        feedback_note,
        next_task: persisted_next_task,
        feedback_sentiment,
        dhi_scores,
        overall_score_hundredths,
        status: persisted_status,
        created_at,
    } = row;

    let task_id = TaskId::new(task_key).map_err(ReviewRepositoryError::persistence)?;
    let username = username
        .map(Username::new)
        .transpose()
        .map_err(ReviewRepositoryError::persistence)?;
    let review_data = serde_json::from_value::<ReviewData>(persisted_review_data)
        .map_err(ReviewRepositoryError::persistence)?;
    let next_task = persisted_next_task
        .map(serde_json::from_value::<NextTask>)
        .transpose()
        .map_err(ReviewRepositoryError::persistence)?;
    let feedback = feedback_from_columns(feedback_sentiment, dhi_scores, overall_score_hundredths)?;
    let status = ReviewStatus::try_from(persisted_status.as_str())
        .map_err(ReviewRepositoryError::persistence)?;

    ReviewRecord::from_persisted(PersistedReviewData {
        review_id: ReviewId::from_uuid(id),
        task_id,
        username,
        review_data,
        feedback_note,
        next_task,
        feedback,
        status,
        timestamp: created_at,
    })
    .map_err(ReviewRepositoryError::persistence)
}

fn feedback_from_columns(
    sentiment: Option<String>,
    dhi_scores: Option<Value>,
    overall_score_hundredths: Option<i32>,
) -> ReviewRepositoryResult<Option<RecordedFeedback>> {
    match (sentiment, dhi_scores, overall_score_hundredths) {
        (None, None, None) => Ok(None),
        (Some(raw_sentiment), Some(raw_scores), Some(hundredths)) => {
            let parsed_sentiment = Sentiment::try_from(raw_sentiment.as_str())
                .map_err(ReviewRepositoryError::persistence)?;
            let scores = serde_json::from_value::<DhiScores>(raw_scores)
                .map_err(ReviewRepositoryError::persistence)?;
            let overall = u32::try_from(hundredths)
                .map(OverallScore::from_hundredths)
                .map_err(ReviewRepositoryError::persistence)?;
            Ok(Some(RecordedFeedback::from_persisted(
                parsed_sentiment,
                scores,
                overall,
            )))
        }
        _ => Err(ReviewRepositoryError::persistence(std::io::Error::other(
            "partially persisted feedback columns",
        ))),
    }
}
