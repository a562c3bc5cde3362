//! Store port for task persistence and column listings.

use crate::identity::domain::OwnerId;
use crate::task::domain::{ColumnStatus, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Each call is durable on its own; no transaction spans several calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns the tasks of one column, ascending by position.
    ///
    /// Ties are broken by creation time, then identifier.
    async fn list_by_owner_and_status(
        &self,
        owner_id: OwnerId,
        status: &ColumnStatus,
    ) -> TaskStoreResult<Vec<Task>>;

    /// Returns every task of an owner, ascending by position.
    ///
    /// Ties are broken by creation time, then identifier.
    async fn list_by_owner(&self, owner_id: OwnerId) -> TaskStoreResult<Vec<Task>>;

    /// Inserts the task if it is new, otherwise overwrites its mutable
    /// fields (title, description, status, position, due date, update time).
    async fn save(&self, task: &Task) -> TaskStoreResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
