//! Application services for the task store.

mod catalog;

pub use catalog::{CreateTaskRequest, TaskCatalogError, TaskCatalogResult, TaskCatalogService};
