//! Review workflow: submissions, model-driven reviews and admin feedback.
//!
//! A review is created from a resolved submission in the
//! `pending_feedback` state. Admin feedback moves it to
//! `feedback_provided`, which in turn unlocks follow-up task generation.
//! The module follows hexagonal architecture:
//!
//! - Domain types and the lifecycle state machine in [`domain`]
//! - Port contracts for persistence, the model and link fetching in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
