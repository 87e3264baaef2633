//! `PostgreSQL` adapters for review record persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresReviewRepository, ReviewPgPool};
