//! Shared world state for task board BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::identity::domain::OwnerId;
use taskboard::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Task, TaskId},
    services::{TaskService, TaskServiceError},
};

/// Service type used by the BDD world.
pub type TestBoardService = TaskService<InMemoryTaskStore, DefaultClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub service: TestBoardService,
    pub owner: OwnerId,
    pub tasks_by_title: HashMap<String, TaskId>,
    pub last_move_result: Option<Result<Task, TaskServiceError>>,
}

impl TaskBoardWorld {
    /// Creates a world with an empty board for a fresh owner.
    #[must_use]
    pub fn new() -> Self {
        let service =
            TaskService::new(Arc::new(InMemoryTaskStore::new()), Arc::new(DefaultClock));

        Self {
            service,
            owner: OwnerId::new(),
            tasks_by_title: HashMap::new(),
            last_move_result: None,
        }
    }

    /// Looks up a seeded task by title.
    ///
    /// # Errors
    ///
    /// Returns an error if no task with `title` was seeded.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled {title} in scenario world"))
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Splits a comma-separated title list from a step.
pub fn titles(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
