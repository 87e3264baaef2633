//! Adapter implementations for the review ports.
//!
//! - [`memory::InMemoryReviewRepository`]: thread-safe in-memory storage
//! - [`postgres::PostgresReviewRepository`]: Diesel-backed `PostgreSQL`
//!   storage with JSONB columns for the nested documents
//! - [`http::OpenAiCompatibleModel`]: chat-completions model client
//! - [`http::HttpContentFetcher`]: single-shot link fetcher

pub mod http;
pub mod memory;
pub mod postgres;
