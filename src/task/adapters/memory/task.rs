//! In-memory task store for tests and single-process deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identity::domain::OwnerId;
use crate::task::{
    domain::{ColumnStatus, Task, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Collects matching tasks in column order.
fn collect_ordered<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut matching: Vec<Task> = tasks.cloned().collect();
    matching.sort_by(Task::column_order);
    matching
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let tasks = self.read()?;
        Ok(tasks.get(&id).cloned())
    }

    async fn list_by_owner_and_status(
        &self,
        owner_id: OwnerId,
        status: &ColumnStatus,
    ) -> TaskStoreResult<Vec<Task>> {
        let tasks = self.read()?;
        Ok(collect_ordered(
            tasks
                .values()
                .filter(|task| task.is_in_column(owner_id, status)),
        ))
    }

    async fn list_by_owner(&self, owner_id: OwnerId) -> TaskStoreResult<Vec<Task>> {
        let tasks = self.read()?;
        Ok(collect_ordered(
            tasks.values().filter(|task| task.owner_id() == owner_id),
        ))
    }

    async fn save(&self, task: &Task) -> TaskStoreResult<()> {
        let mut tasks = self.write()?;
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut tasks = self.write()?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskStoreError::NotFound(id))
    }
}
