//! Boundary error taxonomy.

use super::AuthError;
use crate::review::{
    domain::ReviewDomainError,
    ports::{ModelError, ReviewRepositoryError},
    services::{FeedbackError, ReviewEngineError, SubmissionError},
};
use crate::task::{
    domain::TaskDomainError, ports::TaskRepositoryError, services::TaskCatalogError,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Stable failure discriminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unknown task.
    TaskNotFound,
    /// Unknown review.
    ReviewNotFound,
    /// Rejected input.
    ValidationError,
    /// Submission bytes are not UTF-8.
    DecodeError,
    /// Linked submission could not be fetched.
    FetchError,
    /// Operation gated by the review lifecycle.
    Locked,
    /// Model call failed.
    ModelInvocationError,
    /// Model output did not match the declared shape.
    ParseError,
    /// Bad shared secret or admin password.
    Unauthorized,
    /// Task identifier already taken.
    DuplicateTask,
    /// Storage failure.
    PersistenceError,
}

impl ErrorKind {
    /// Returns the discriminator string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskNotFound => "task_not_found",
            Self::ReviewNotFound => "review_not_found",
            Self::ValidationError => "validation_error",
            Self::DecodeError => "decode_error",
            Self::FetchError => "fetch_error",
            Self::Locked => "locked",
            Self::ModelInvocationError => "model_invocation_error",
            Self::ParseError => "parse_error",
            Self::Unauthorized => "unauthorized",
            Self::DuplicateTask => "duplicate_task",
            Self::PersistenceError => "persistence_error",
        }
    }

    /// Returns the HTTP-equivalent status code.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::TaskNotFound | Self::ReviewNotFound => 404,
            Self::ValidationError | Self::DecodeError | Self::FetchError | Self::DuplicateTask => {
                400
            }
            Self::Locked => 423,
            Self::Unauthorized => 401,
            Self::ModelInvocationError | Self::ParseError | Self::PersistenceError => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a gateway operation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {detail}")]
pub struct ApiError {
    #[serde(rename = "error")]
    kind: ErrorKind,
    detail: String,
}

impl ApiError {
    /// Creates an error from a discriminator and detail message.
    #[must_use]
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Returns the discriminator.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable detail.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Returns the HTTP-equivalent status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    fn from_display(kind: ErrorKind, err: &impl fmt::Display) -> Self {
        Self::new(kind, err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::from_display(ErrorKind::Unauthorized, &err)
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        Self::from_display(ErrorKind::ValidationError, &err)
    }
}

impl From<ReviewDomainError> for ApiError {
    fn from(err: ReviewDomainError) -> Self {
        Self::from_display(ErrorKind::ValidationError, &err)
    }
}

impl From<TaskCatalogError> for ApiError {
    fn from(err: TaskCatalogError) -> Self {
        let kind = match &err {
            TaskCatalogError::Domain(_) => ErrorKind::ValidationError,
            TaskCatalogError::Repository(TaskRepositoryError::DuplicateTask(_)) => {
                ErrorKind::DuplicateTask
            }
            TaskCatalogError::Repository(TaskRepositoryError::Persistence(_)) => {
                ErrorKind::PersistenceError
            }
        };
        Self::from_display(kind, &err)
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        let kind = match &err {
            SubmissionError::Decode(_) => ErrorKind::DecodeError,
            SubmissionError::Fetch(_) => ErrorKind::FetchError,
        };
        Self::from_display(kind, &err)
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        let kind = match &err {
            ModelError::Invocation(_) => ErrorKind::ModelInvocationError,
            ModelError::Parse { .. } => ErrorKind::ParseError,
        };
        Self::from_display(kind, &err)
    }
}

impl From<ReviewRepositoryError> for ApiError {
    fn from(err: ReviewRepositoryError) -> Self {
        let kind = match &err {
            ReviewRepositoryError::NotFound(_) => ErrorKind::ReviewNotFound,
            ReviewRepositoryError::DuplicateReview(_) | ReviewRepositoryError::Persistence(_) => {
                ErrorKind::PersistenceError
            }
        };
        Self::from_display(kind, &err)
    }
}

impl From<ReviewEngineError> for ApiError {
    fn from(err: ReviewEngineError) -> Self {
        match err {
            ReviewEngineError::Model(model) => model.into(),
            ReviewEngineError::Repository(repository) => repository.into(),
            ReviewEngineError::Domain(domain) => domain.into(),
            ReviewEngineError::TaskNotFound(_) => Self::from_display(ErrorKind::TaskNotFound, &err),
            ReviewEngineError::ReviewNotFound(_) => {
                Self::from_display(ErrorKind::ReviewNotFound, &err)
            }
            ReviewEngineError::Locked { .. } => Self::from_display(ErrorKind::Locked, &err),
            ReviewEngineError::Prompt(_) => {
                Self::from_display(ErrorKind::ModelInvocationError, &err)
            }
            ReviewEngineError::TaskRepository(_) => {
                Self::from_display(ErrorKind::PersistenceError, &err)
            }
        }
    }
}

impl From<FeedbackError> for ApiError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::ReviewNotFound(_) => {
                Self::from_display(ErrorKind::ReviewNotFound, &err)
            }
            FeedbackError::Validation(domain) => domain.into(),
            FeedbackError::Repository(repository) => repository.into(),
        }
    }
}
