//! Task service facade enforcing ownership before delegating to the engine.

use super::locks::OwnerLocks;
use super::ordering::{OrderingEngine, OrderingError};
use crate::identity::domain::{OwnerId, ensure_owned_by};
use crate::task::{
    domain::{
        ColumnStatus, Position, Task, TaskDetails, TaskDetailsPatch, TaskDomainError, TaskId,
    },
    ports::{TaskStore, TaskStoreError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    status: String,
    details: TaskDetails,
}

impl CreateTaskRequest {
    /// Creates a request for a task titled `title` in the `status` column.
    #[must_use]
    pub fn new(status: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            details: TaskDetails::new(title),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.details = self.details.with_description(description);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.details = self.details.with_due_date(due_date);
        self
    }
}

/// Request payload for a drag-and-drop move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    status: String,
    position: i64,
}

impl MoveTaskRequest {
    /// Creates a request moving a task to `position` of `status`.
    ///
    /// Passing the task's current status reorders within its column.
    #[must_use]
    pub fn new(status: impl Into<String>, position: i64) -> Self {
        Self {
            status: status.into(),
            position,
        }
    }
}

/// Request payload for editing a task, optionally recolumning it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateTaskRequest {
    patch: TaskDetailsPatch,
    status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request applying `patch`.
    #[must_use]
    pub fn new(patch: TaskDetailsPatch) -> Self {
        Self {
            patch,
            status: None,
        }
    }

    /// Moves the task to the end of `status` when it differs from the
    /// current column.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task exists but belongs to another owner.
    #[error("task {0} belongs to another owner")]
    Unauthorized(TaskId),

    /// Caller input failed validation.
    #[error(transparent)]
    InvalidArgument(#[from] TaskDomainError),

    /// A reorder stopped part way; the listed columns may need repair.
    #[error(
        "reorder for owner {owner_id} stopped after {applied} writes in {columns:?}: {source}"
    )]
    PartialReorderFailure {
        /// Owner of the affected columns.
        owner_id: OwnerId,
        /// Columns that may not be dense.
        columns: Vec<ColumnStatus>,
        /// Writes that succeeded before the failure.
        applied: usize,
        /// The failed write.
        #[source]
        source: TaskStoreError,
    },

    /// Store operation failed.
    #[error(transparent)]
    Repository(TaskStoreError),

    /// Engine precondition failed.
    #[error(transparent)]
    Ordering(OrderingError),
}

impl From<TaskStoreError> for TaskServiceError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(task_id) => Self::NotFound(task_id),
            other @ TaskStoreError::Persistence(_) => Self::Repository(other),
        }
    }
}

impl From<OrderingError> for TaskServiceError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::Store(store_err) => Self::from(store_err),
            OrderingError::Domain(domain_err) => Self::InvalidArgument(domain_err),
            OrderingError::PartialReorder {
                owner_id,
                columns,
                applied,
                source,
            } => Self::PartialReorderFailure {
                owner_id,
                columns,
                applied,
                source,
            },
            other @ OrderingError::GuardMismatch { .. } => Self::Ordering(other),
        }
    }
}

/// Result type for board service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Board facade: resolves ownership, then delegates to the ordering engine.
pub struct TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    engine: OrderingEngine<S, C>,
}

impl<S, C> Clone for TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            engine: self.engine.clone(),
        }
    }
}

impl<S, C> TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new board service with its own owner lock table.
    ///
    /// Share one instance (or its clones) across every caller writing to
    /// `store`; separately constructed services do not serialize against
    /// each other. Use [`Self::with_locks`] to share a lock table instead.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self::with_locks(store, clock, OwnerLocks::new())
    }

    /// Creates a board service whose writes serialize through `locks`.
    #[must_use]
    pub fn with_locks(store: Arc<S>, clock: Arc<C>, locks: OwnerLocks) -> Self {
        let engine = OrderingEngine::with_locks(Arc::clone(&store), clock, locks);
        Self { store, engine }
    }

    /// Creates a task at the end of its column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidArgument`] for a blank status and
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create_task(
        &self,
        owner_id: OwnerId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let status = ColumnStatus::new(request.status)?;
        let guard = self.engine.lock(owner_id).await;
        let task = self
            .engine
            .create(&guard, status, request.details)
            .await
            .map_err(|err| report(owner_id, err))?;
        tracing::info!(
            %owner_id,
            task_id = %task.id(),
            status = %task.status(),
            position = %task.position(),
            "created task"
        );
        Ok(task)
    }

    /// Returns one task of the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] or
    /// [`TaskServiceError::Unauthorized`].
    pub async fn get_task(&self, owner_id: OwnerId, task_id: TaskId) -> TaskServiceResult<Task> {
        self.load_owned(owner_id, task_id).await
    }

    /// Returns the caller's whole board, ascending by position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self, owner_id: OwnerId) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.store.list_by_owner(owner_id).await?;
        tracing::debug!(%owner_id, count = tasks.len(), "listed board");
        Ok(tasks)
    }

    /// Returns one column of the caller's board, ascending by position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidArgument`] for a blank status and
    /// [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_tasks_by_status(
        &self,
        owner_id: OwnerId,
        status: &str,
    ) -> TaskServiceResult<Vec<Task>> {
        let column = ColumnStatus::new(status)?;
        let tasks = self
            .store
            .list_by_owner_and_status(owner_id, &column)
            .await?;
        tracing::debug!(%owner_id, status = %column, count = tasks.len(), "listed column");
        Ok(tasks)
    }

    /// Edits title, description or due date. Status and position are kept.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`],
    /// [`TaskServiceError::Unauthorized`] or
    /// [`TaskServiceError::Repository`].
    pub async fn update_task_fields(
        &self,
        owner_id: OwnerId,
        task_id: TaskId,
        patch: TaskDetailsPatch,
    ) -> TaskServiceResult<Task> {
        let guard = self.engine.lock(owner_id).await;
        let task = self.load_owned(owner_id, task_id).await?;
        let updated = self
            .engine
            .update_fields(&guard, task, patch)
            .await
            .map_err(|err| report(owner_id, err))?;
        tracing::info!(%owner_id, %task_id, "updated task fields");
        Ok(updated)
    }

    /// Edits a task and, when `status` names another column, appends it to
    /// the end of that column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidArgument`] for a blank status,
    /// [`TaskServiceError::NotFound`], [`TaskServiceError::Unauthorized`],
    /// [`TaskServiceError::PartialReorderFailure`] or
    /// [`TaskServiceError::Repository`].
    pub async fn update_task(
        &self,
        owner_id: OwnerId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let UpdateTaskRequest { patch, status } = request;
        let target = status.map(ColumnStatus::new).transpose()?;

        let guard = self.engine.lock(owner_id).await;
        let task = self.load_owned(owner_id, task_id).await?;
        let Some(new_status) = target.filter(|candidate| candidate != task.status()) else {
            let edited = self
                .engine
                .update_fields(&guard, task, patch)
                .await
                .map_err(|err| report(owner_id, err))?;
            tracing::info!(%owner_id, %task_id, "updated task");
            return Ok(edited);
        };
        let moved = self
            .engine
            .update_and_recolumn(&guard, task, patch, new_status)
            .await
            .map_err(|err| report(owner_id, err))?;
        tracing::info!(
            %owner_id,
            %task_id,
            status = %moved.status(),
            position = %moved.position(),
            "updated task and appended to new column"
        );
        Ok(moved)
    }

    /// Moves a task to `position` of `status`, reordering both columns.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidArgument`] for a blank status or a
    /// negative position, [`TaskServiceError::NotFound`],
    /// [`TaskServiceError::Unauthorized`],
    /// [`TaskServiceError::PartialReorderFailure`] or
    /// [`TaskServiceError::Repository`].
    pub async fn move_task(
        &self,
        owner_id: OwnerId,
        task_id: TaskId,
        request: MoveTaskRequest,
    ) -> TaskServiceResult<Task> {
        let status = ColumnStatus::new(request.status)?;
        let position = Position::from_signed(request.position)?;

        let guard = self.engine.lock(owner_id).await;
        let task = self.load_owned(owner_id, task_id).await?;
        let from_status = task.status().clone();
        let from_position = task.position();
        let moved = self
            .engine
            .move_task(&guard, task, status, position)
            .await
            .map_err(|err| report(owner_id, err))?;
        tracing::info!(
            %owner_id,
            %task_id,
            %from_status,
            %from_position,
            to_status = %moved.status(),
            to_position = %moved.position(),
            "moved task"
        );
        Ok(moved)
    }

    /// Deletes a task and closes the gap in its column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`],
    /// [`TaskServiceError::Unauthorized`],
    /// [`TaskServiceError::PartialReorderFailure`] or
    /// [`TaskServiceError::Repository`].
    pub async fn delete_task(&self, owner_id: OwnerId, task_id: TaskId) -> TaskServiceResult<()> {
        let guard = self.engine.lock(owner_id).await;
        let task = self.load_owned(owner_id, task_id).await?;
        let status = task.status().clone();
        self.engine
            .delete(&guard, task)
            .await
            .map_err(|err| report(owner_id, err))?;
        tracing::info!(%owner_id, %task_id, %status, "deleted task");
        Ok(())
    }

    /// Rewrites a column of the caller to `0..n`, keeping its order.
    ///
    /// Used to recover after [`TaskServiceError::PartialReorderFailure`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidArgument`] for a blank status,
    /// [`TaskServiceError::PartialReorderFailure`] or
    /// [`TaskServiceError::Repository`].
    pub async fn repair_column(
        &self,
        owner_id: OwnerId,
        status: &str,
    ) -> TaskServiceResult<Vec<Task>> {
        let column = ColumnStatus::new(status)?;
        let guard = self.engine.lock(owner_id).await;
        self.engine
            .normalize(&guard, &column)
            .await
            .map_err(|err| report(owner_id, err))
    }

    async fn load_owned(&self, owner_id: OwnerId, task_id: TaskId) -> TaskServiceResult<Task> {
        let task = self
            .store
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))?;
        if let Err(err) = ensure_owned_by(&task, owner_id) {
            tracing::warn!(
                %task_id,
                caller = %err.caller,
                owner = %err.owner,
                "rejected access to another owner's task"
            );
            return Err(TaskServiceError::Unauthorized(task_id));
        }
        Ok(task)
    }
}

fn report(owner_id: OwnerId, err: OrderingError) -> TaskServiceError {
    if let OrderingError::PartialReorder {
        columns, applied, ..
    } = &err
    {
        tracing::warn!(
            %owner_id,
            ?columns,
            applied,
            error = %err,
            "reorder stopped part way; columns need repair"
        );
    }
    TaskServiceError::from(err)
}
