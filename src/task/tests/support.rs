//! Shared builders for board unit tests.

use crate::identity::domain::OwnerId;
use crate::task::domain::{ColumnStatus, Position, Task, TaskDetails};
use mockable::DefaultClock;

pub fn status(value: &str) -> ColumnStatus {
    ColumnStatus::new(value).expect("valid status")
}

pub fn position(value: u32) -> Position {
    Position::new(value).expect("valid position")
}

/// Builds tasks titled after `titles`, placed at positions `0..n`.
pub fn column(owner_id: OwnerId, column_status: &str, titles: &[&str]) -> Vec<Task> {
    titles
        .iter()
        .enumerate()
        .map(|(index, title)| {
            Task::new(
                owner_id,
                status(column_status),
                Position::from_index(index).expect("valid index"),
                TaskDetails::new(*title),
                &DefaultClock,
            )
        })
        .collect()
}

/// Builds one task at an explicit position.
pub fn task_at(owner_id: OwnerId, column_status: &str, title: &str, at: u32) -> Task {
    Task::new(
        owner_id,
        status(column_status),
        position(at),
        TaskDetails::new(title),
        &DefaultClock,
    )
}

/// Returns `(title, position)` pairs in list order.
pub fn layout(tasks: &[Task]) -> Vec<(String, u32)> {
    tasks
        .iter()
        .map(|task| (task.title().to_owned(), task.position().value()))
        .collect()
}

pub fn expected(pairs: &[(&str, u32)]) -> Vec<(String, u32)> {
    pairs
        .iter()
        .map(|(title, at)| ((*title).to_owned(), *at))
        .collect()
}
