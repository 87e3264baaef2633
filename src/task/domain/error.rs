//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The task identifier exceeds the storage limit.
    #[error("task identifier exceeds {max} characters: {actual}")]
    TaskIdTooLong {
        /// Maximum permitted length.
        max: usize,
        /// Length of the rejected value.
        actual: usize,
    },

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,
}
