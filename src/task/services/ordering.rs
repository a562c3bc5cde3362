//! Ordering engine keeping every board column dense.
//!
//! Each mutating call reads the affected columns, asks the domain planner
//! for the position changes, and writes them one row at a time. The task
//! being created or moved is always written last. Callers must hold the
//! owner's [`OwnerGuard`] for the whole call.

use super::locks::{OwnerGuard, OwnerLocks};
use crate::identity::domain::OwnerId;
use crate::task::{
    domain::{
        ColumnStatus, MovePlan, Position, PositionChange, Task, TaskDetails, TaskDetailsPatch,
        TaskDomainError, TaskId, plan_move, plan_normalization, plan_removal,
    },
    ports::{TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by the ordering engine.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// A store call failed before anything was written.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// A position could not be represented.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// A store write failed after earlier writes of the same operation
    /// succeeded, so the listed columns may not be dense.
    #[error("reorder for owner {owner_id} stopped after {applied} writes in {columns:?}: {source}")]
    PartialReorder {
        /// Owner of the affected columns.
        owner_id: OwnerId,
        /// Columns that may need repair.
        columns: Vec<ColumnStatus>,
        /// Writes that succeeded before the failure.
        applied: usize,
        /// The failed write.
        #[source]
        source: TaskStoreError,
    },

    /// The supplied guard belongs to a different owner than the task.
    #[error("write lock held for {held}, but the task belongs to {expected}")]
    GuardMismatch {
        /// Owner of the task.
        expected: OwnerId,
        /// Owner whose lock is held.
        held: OwnerId,
    },
}

/// Result type for ordering engine operations.
pub type OrderingResult<T> = Result<T, OrderingError>;

/// Tracks writes of one operation to classify a failure.
struct WriteProgress {
    owner_id: OwnerId,
    columns: Vec<ColumnStatus>,
    applied: usize,
}

impl WriteProgress {
    const fn new(owner_id: OwnerId, columns: Vec<ColumnStatus>) -> Self {
        Self {
            owner_id,
            columns,
            applied: 0,
        }
    }

    fn fail(&self, source: TaskStoreError) -> OrderingError {
        if self.applied == 0 {
            return OrderingError::Store(source);
        }
        OrderingError::PartialReorder {
            owner_id: self.owner_id,
            columns: self.columns.clone(),
            applied: self.applied,
            source,
        }
    }
}

/// Invariant-preserving mutation of board columns.
pub struct OrderingEngine<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    locks: OwnerLocks,
}

impl<S, C> Clone for OrderingEngine<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            locks: self.locks.clone(),
        }
    }
}

impl<S, C> OrderingEngine<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates an engine over `store` with its own lock table.
    ///
    /// Only clones of this engine serialize against each other. Use
    /// [`Self::with_locks`] when several engines write to one store.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self::with_locks(store, clock, OwnerLocks::new())
    }

    /// Creates an engine over `store` sharing the `locks` table.
    #[must_use]
    pub const fn with_locks(store: Arc<S>, clock: Arc<C>, locks: OwnerLocks) -> Self {
        Self {
            store,
            clock,
            locks,
        }
    }

    /// Waits for the write lock of `owner_id`.
    pub async fn lock(&self, owner_id: OwnerId) -> OwnerGuard {
        self.locks.acquire(owner_id).await
    }

    /// Appends a new task to the end of the `status` column.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Store`] when listing or saving fails.
    pub async fn create(
        &self,
        guard: &OwnerGuard,
        status: ColumnStatus,
        details: TaskDetails,
    ) -> OrderingResult<Task> {
        let owner_id = guard.owner_id();
        let column = self
            .store
            .list_by_owner_and_status(owner_id, &status)
            .await?;
        let position = Position::from_index(column.len())?;
        let task = Task::new(owner_id, status, position, details, &*self.clock);
        self.store.save(&task).await?;
        Ok(task)
    }

    /// Applies a details edit without touching status or position.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::GuardMismatch`] for a foreign guard and
    /// [`OrderingError::Store`] when saving fails.
    pub async fn update_fields(
        &self,
        guard: &OwnerGuard,
        mut task: Task,
        patch: TaskDetailsPatch,
    ) -> OrderingResult<Task> {
        ensure_guard(guard, &task)?;
        task.apply_patch(patch, &*self.clock);
        self.store.save(&task).await?;
        Ok(task)
    }

    /// Applies a details edit and appends the task to the `status` column.
    ///
    /// The task is saved once, carrying both the edit and its new slot, so a
    /// failure before any write leaves the stored task untouched. When
    /// `status` is the current column this is [`Self::update_fields`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Store`] when nothing was written yet,
    /// [`OrderingError::PartialReorder`] when some writes succeeded, and
    /// [`OrderingError::GuardMismatch`] for a foreign guard.
    pub async fn update_and_recolumn(
        &self,
        guard: &OwnerGuard,
        mut task: Task,
        patch: TaskDetailsPatch,
        status: ColumnStatus,
    ) -> OrderingResult<Task> {
        ensure_guard(guard, &task)?;
        if &status == task.status() {
            return self.update_fields(guard, task, patch).await;
        }
        if !patch.is_empty() {
            task.apply_patch(patch, &*self.clock);
        }
        self.move_task(guard, task, status, Position::END).await
    }

    /// Moves `task` to `position` of the `status` column.
    ///
    /// A position past the end of the destination appends. Moving a task to
    /// the slot it already occupies writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Store`] when nothing was written yet,
    /// [`OrderingError::PartialReorder`] when some writes succeeded, and
    /// [`OrderingError::GuardMismatch`] for a foreign guard.
    pub async fn move_task(
        &self,
        guard: &OwnerGuard,
        mut task: Task,
        status: ColumnStatus,
        position: Position,
    ) -> OrderingResult<Task> {
        ensure_guard(guard, &task)?;
        let owner_id = task.owner_id();
        let source = self
            .store
            .list_by_owner_and_status(owner_id, task.status())
            .await?;
        let destination = if &status == task.status() {
            None
        } else {
            Some(
                self.store
                    .list_by_owner_and_status(owner_id, &status)
                    .await?,
            )
        };

        let plan = plan_move(&source, destination.as_deref(), &task, position)?;
        let MovePlan::Apply { shifts, target } = plan else {
            tracing::debug!(task_id = %task.id(), "move target equals current slot");
            return Ok(task);
        };
        tracing::debug!(
            task_id = %task.id(),
            shifted = shifts.len(),
            target = %target,
            "planned move"
        );

        let mut columns = vec![task.status().clone()];
        if destination.is_some() {
            columns.push(status.clone());
        }
        let mut writes = WriteProgress::new(owner_id, columns);
        let neighbours = source.into_iter().chain(destination.into_iter().flatten());
        self.apply_shifts(neighbours, &shifts, &mut writes).await?;

        task.relocate(status, target, &*self.clock);
        self.save_tracked(&task, &mut writes).await?;
        Ok(task)
    }

    /// Deletes `task` and closes the gap it leaves in its column.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Store`] when the delete itself fails,
    /// [`OrderingError::PartialReorder`] when a later shift fails, and
    /// [`OrderingError::GuardMismatch`] for a foreign guard.
    pub async fn delete(&self, guard: &OwnerGuard, task: Task) -> OrderingResult<()> {
        ensure_guard(guard, &task)?;
        let column = self
            .store
            .list_by_owner_and_status(task.owner_id(), task.status())
            .await?;
        let shifts = plan_removal(&column, task.id())?;

        let mut writes = WriteProgress::new(task.owner_id(), vec![task.status().clone()]);
        self.store
            .delete(task.id())
            .await
            .map_err(|err| writes.fail(err))?;
        writes.applied += 1;

        self.apply_shifts(column, &shifts, &mut writes).await?;
        Ok(())
    }

    /// Rewrites the `status` column of the guarded owner to `0..n` in its
    /// current order and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Store`] or [`OrderingError::PartialReorder`]
    /// when a store call fails.
    pub async fn normalize(
        &self,
        guard: &OwnerGuard,
        status: &ColumnStatus,
    ) -> OrderingResult<Vec<Task>> {
        let owner_id = guard.owner_id();
        let column = self
            .store
            .list_by_owner_and_status(owner_id, status)
            .await?;
        let shifts = plan_normalization(&column)?;
        if !shifts.is_empty() {
            tracing::info!(
                %owner_id,
                %status,
                repaired = shifts.len(),
                "normalizing column"
            );
        }

        let mut writes = WriteProgress::new(owner_id, vec![status.clone()]);
        let mut repaired = self.apply_shifts(column, &shifts, &mut writes).await?;
        repaired.sort_by(Task::column_order);
        Ok(repaired)
    }

    /// Writes each planned change and returns every neighbour, updated or
    /// not.
    async fn apply_shifts(
        &self,
        neighbours: impl IntoIterator<Item = Task> + Send,
        shifts: &[PositionChange],
        writes: &mut WriteProgress,
    ) -> OrderingResult<Vec<Task>> {
        let mut by_id: HashMap<TaskId, Task> = neighbours
            .into_iter()
            .map(|task| (task.id(), task))
            .collect();
        for change in shifts {
            let Some(task) = by_id.get_mut(&change.task_id) else {
                continue;
            };
            task.reposition(change.position, &*self.clock);
            self.save_tracked(task, writes).await?;
        }
        Ok(by_id.into_values().collect())
    }

    async fn save_tracked(&self, task: &Task, writes: &mut WriteProgress) -> OrderingResult<()> {
        self.store
            .save(task)
            .await
            .map_err(|err| writes.fail(err))?;
        writes.applied += 1;
        Ok(())
    }
}

fn ensure_guard(guard: &OwnerGuard, task: &Task) -> OrderingResult<()> {
    if guard.owner_id() == task.owner_id() {
        return Ok(());
    }
    Err(OrderingError::GuardMismatch {
        expected: task.owner_id(),
        held: guard.owner_id(),
    })
}
