//! Task store for the review workflow.
//!
//! Task definitions are the briefs that submissions are reviewed against.
//! They are created under a caller-assigned identifier, never mutated and
//! never deleted. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
