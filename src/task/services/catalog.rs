//! Service layer for task definition creation and retrieval.

use crate::task::{
    domain::{Task, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a task definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    task_id: String,
    title: String,
    description: String,
}

impl CreateTaskRequest {
    /// Creates a request with all task fields.
    #[must_use]
    pub fn new(
        task_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Service-level errors for task store operations.
#[derive(Debug, Error)]
pub enum TaskCatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task store service operations.
pub type TaskCatalogResult<T> = Result<T, TaskCatalogError>;

/// Task definition orchestration service.
#[derive(Clone)]
pub struct TaskCatalogService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskCatalogService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task store service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and stores a new task definition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::Domain`] when the identifier or title is
    /// invalid and [`TaskCatalogError::Repository`] when the identifier is
    /// already taken or persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskCatalogResult<Task> {
        let CreateTaskRequest {
            task_id,
            title,
            description,
        } = request;
        let id = TaskId::new(task_id)?;
        let task = Task::new(id, title, description, &*self.clock)?;
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task definition by identifier.
    ///
    /// Returns `Ok(None)` when no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::Repository`] when the lookup fails.
    pub async fn find(&self, id: &TaskId) -> TaskCatalogResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists every task definition ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::Repository`] when the lookup fails.
    pub async fn list(&self) -> TaskCatalogResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }
}
