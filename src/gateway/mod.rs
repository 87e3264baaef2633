//! Inbound boundary for the review workflow.
//!
//! The gateway is transport agnostic: every operation takes the caller's
//! shared secret, checks it with one [`ApiKeyGuard`], and reports failures
//! as an [`ApiError`] carrying a stable discriminator and an
//! HTTP-equivalent status code.

mod auth;
mod error;
mod facade;

pub use auth::{AdminGuard, ApiKeyGuard, AuthError};
pub use error::{ApiError, ErrorKind};
pub use facade::{GatewayAdapters, ReviewGateway, SubmitReviewRequest};

#[cfg(test)]
mod tests;
