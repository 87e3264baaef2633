//! Domain model for task definitions.
//!
//! A task definition is the brief a submission is reviewed against. It is
//! created once under a caller-assigned identifier and never mutated.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use task::{PersistedTaskData, Task};
