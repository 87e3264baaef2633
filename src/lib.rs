//! Assessor: task-review workflow orchestration.
//!
//! Submissions (inline text, uploaded files or links) are reviewed by a
//! text-completion model against a stored task definition. An admin then
//! scores the review on dignity, honesty and integrity, which unlocks the
//! generation of a follow-up task.
//!
//! # Architecture
//!
//! Assessor follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`task`]: Task definition store
//! - [`review`]: Submission resolution, model-driven review and feedback
//! - [`gateway`]: Authorized operation facade and error taxonomy
//! - [`config`], [`telemetry`], [`bootstrap`]: Process wiring

pub mod bootstrap;
pub mod config;
pub mod gateway;
pub mod review;
pub mod task;
pub mod telemetry;
