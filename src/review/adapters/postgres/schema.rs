//! Diesel schema for review record persistence.

diesel::table! {
    /// Review records with JSONB documents for model and admin output.
    reviews (id) {
        /// Review identifier.
        id -> Uuid,
        /// Reviewed task identifier.
        #[max_length = 255]
        task_key -> Varchar,
        /// Submitter identity.
        #[max_length = 255]
        username -> Nullable<Varchar>,
        /// Structured model review.
        review_data -> Jsonb,
        /// Mentor note.
        feedback_note -> Text,
        /// Generated follow-up task.
        next_task -> Nullable<Jsonb>,
        /// Admin verdict.
        #[max_length = 16]
        feedback_sentiment -> Nullable<Varchar>,
        /// Admin dignity, honesty and integrity scores.
        dhi_scores -> Nullable<Jsonb>,
        /// Overall score in hundredths.
        overall_score_hundredths -> Nullable<Int4>,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
