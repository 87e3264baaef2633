//! Port contracts for the review workflow.
//!
//! The workflow depends on three collaborators: a document store for review
//! records, a text-completion model, and a fetcher for linked submissions.

pub mod fetcher;
pub mod model;
pub mod repository;

pub use fetcher::{ContentFetcher, FetchError};
pub use model::{
    CompletionOutput, CompletionRequest, ModelError, ModelResult, ModelService, OutputShape,
};
pub use repository::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult};
