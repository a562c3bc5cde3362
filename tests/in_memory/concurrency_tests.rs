//! Concurrent mutations of one board must not corrupt column order.

use super::helpers::{BoardService, ensure_dense, owner, seed_column, service};
use rstest::rstest;
use std::collections::HashSet;
use taskboard::identity::domain::OwnerId;
use taskboard::task::services::{CreateTaskRequest, MoveTaskRequest};
use tokio::task::JoinSet;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_positions(
    service: BoardService,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let mut creates = JoinSet::new();
    for index in 0..24 {
        let board = service.clone();
        creates.spawn(async move {
            board
                .create_task(owner, CreateTaskRequest::new("Todo", format!("task {index}")))
                .await
        });
    }
    while let Some(joined) = creates.join_next().await {
        joined??;
    }

    let column = service.list_tasks_by_status(owner, "Todo").await?;
    eyre::ensure!(column.len() == 24, "expected 24 tasks, found {}", column.len());
    ensure_dense(&column)
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_moves_keep_columns_dense(
    service: BoardService,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let titles = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let todo = seed_column(&service, owner, "Todo", &titles).await?;

    let mut moves = JoinSet::new();
    for (task, status) in todo.iter().zip(["Done", "Todo"].into_iter().cycle()) {
        let board = service.clone();
        let task_id = task.id();
        moves.spawn(async move {
            board
                .move_task(owner, task_id, MoveTaskRequest::new(status, 0))
                .await
        });
    }
    while let Some(joined) = moves.join_next().await {
        joined??;
    }

    let todo_column = service.list_tasks_by_status(owner, "Todo").await?;
    let done_column = service.list_tasks_by_status(owner, "Done").await?;
    ensure_dense(&todo_column)?;
    ensure_dense(&done_column)?;

    let seen: HashSet<_> = todo_column
        .iter()
        .chain(&done_column)
        .map(|task| task.id())
        .collect();
    eyre::ensure!(
        seen.len() == titles.len() && todo_column.len() + done_column.len() == titles.len(),
        "every task must appear exactly once"
    );
    Ok(())
}
