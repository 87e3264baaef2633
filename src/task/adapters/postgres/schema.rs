//! Diesel schema for task definition persistence.

diesel::table! {
    /// Task definitions keyed by their caller-assigned identifier.
    tasks (task_key) {
        /// Caller-assigned task identifier.
        #[max_length = 255]
        task_key -> Varchar,
        /// Task title.
        title -> Text,
        /// Task description used as review context.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
