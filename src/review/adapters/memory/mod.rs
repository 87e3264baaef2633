//! In-memory review store adapter.

mod review;

pub use review::InMemoryReviewRepository;
