//! In-memory integration tests for drag-and-drop board scenarios.

use super::helpers::{BoardService, column_layout, layout_of, owner, seed_column, service};
use rstest::rstest;
use taskboard::identity::domain::OwnerId;
use taskboard::task::services::{CreateTaskRequest, MoveTaskRequest, TaskServiceError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_tasks_append_to_their_column(
    service: BoardService,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    seed_column(&service, owner, "Todo", &["A", "B"]).await?;
    seed_column(&service, owner, "Done", &["X"]).await?;

    let created = service
        .create_task(owner, CreateTaskRequest::new("Todo", "C"))
        .await?;

    eyre::ensure!(created.position().value() == 2, "C should land at 2");
    eyre::ensure!(
        column_layout(&service, owner, "Done").await? == layout_of(&[("X", 0)]),
        "creating in Todo must not touch Done"
    );
    Ok(())
}

#[rstest]
#[case::up(3, 1, &[("A", 0), ("D", 1), ("B", 2), ("C", 3)])]
#[case::down(0, 2, &[("B", 0), ("C", 1), ("A", 2), ("D", 3)])]
#[case::to_top(2, 0, &[("C", 0), ("A", 1), ("B", 2), ("D", 3)])]
#[case::past_the_end(1, 40, &[("A", 0), ("C", 1), ("D", 2), ("B", 3)])]
#[case::same_slot(2, 2, &[("A", 0), ("B", 1), ("C", 2), ("D", 3)])]
#[tokio::test(flavor = "multi_thread")]
async fn same_column_moves_keep_the_column_dense(
    service: BoardService,
    owner: OwnerId,
    #[case] from: usize,
    #[case] to: i64,
    #[case] expected: &[(&str, u32)],
) -> Result<(), eyre::Report> {
    let todo = seed_column(&service, owner, "Todo", &["A", "B", "C", "D"]).await?;
    let moving = todo
        .get(from)
        .ok_or_else(|| eyre::eyre!("no task at index {from}"))?;

    service
        .move_task(owner, moving.id(), MoveTaskRequest::new("Todo", to))
        .await?;

    eyre::ensure!(
        column_layout(&service, owner, "Todo").await? == layout_of(expected),
        "unexpected column layout after moving index {from} to {to}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cross_column_move_updates_both_columns(
    service: BoardService,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let todo = seed_column(&service, owner, "Todo", &["T0", "T1", "T2"]).await?;
    seed_column(&service, owner, "Done", &["D0", "D1"]).await?;
    let first = todo.first().ok_or_else(|| eyre::eyre!("empty column"))?;

    let moved = service
        .move_task(owner, first.id(), MoveTaskRequest::new("Done", 1))
        .await?;

    eyre::ensure!(moved.status().as_str() == "Done", "status not updated");
    eyre::ensure!(
        column_layout(&service, owner, "Todo").await? == layout_of(&[("T1", 0), ("T2", 1)]),
        "source column not closed"
    );
    eyre::ensure!(
        column_layout(&service, owner, "Done").await?
            == layout_of(&[("D0", 0), ("T0", 1), ("D1", 2)]),
        "destination column not opened"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_into_an_empty_column_takes_the_first_slot(
    service: BoardService,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let todo = seed_column(&service, owner, "Todo", &["A", "B"]).await?;
    let last = todo.last().ok_or_else(|| eyre::eyre!("empty column"))?;

    let moved = service
        .move_task(owner, last.id(), MoveTaskRequest::new("Review", 5))
        .await?;

    eyre::ensure!(moved.position().value() == 0, "expected the first slot");
    eyre::ensure!(
        column_layout(&service, owner, "Review").await? == layout_of(&[("B", 0)]),
        "review column should hold only B"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_closes_the_gap(service: BoardService, owner: OwnerId) -> Result<(), eyre::Report> {
    let todo = seed_column(&service, owner, "Todo", &["A", "B", "C", "D"]).await?;
    let second = todo.get(1).ok_or_else(|| eyre::eyre!("missing B"))?;

    service.delete_task(owner, second.id()).await?;

    eyre::ensure!(
        column_layout(&service, owner, "Todo").await?
            == layout_of(&[("A", 0), ("C", 1), ("D", 2)]),
        "gap left behind after delete"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn another_owner_cannot_move_a_task(
    service: BoardService,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let todo = seed_column(&service, owner, "Todo", &["A", "B"]).await?;
    let first = todo.first().ok_or_else(|| eyre::eyre!("empty column"))?;

    let result = service
        .move_task(OwnerId::new(), first.id(), MoveTaskRequest::new("Todo", 1))
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskServiceError::Unauthorized(_))),
        "expected Unauthorized, got {result:?}"
    );
    eyre::ensure!(
        column_layout(&service, owner, "Todo").await? == layout_of(&[("A", 0), ("B", 1)]),
        "rejected move must not reorder"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn boards_of_different_owners_are_independent(
    service: BoardService,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let other = OwnerId::new();
    seed_column(&service, owner, "Todo", &["A", "B"]).await?;
    let theirs = seed_column(&service, other, "Todo", &["X", "Y"]).await?;
    let last = theirs.last().ok_or_else(|| eyre::eyre!("empty column"))?;

    service
        .move_task(other, last.id(), MoveTaskRequest::new("Todo", 0))
        .await?;

    eyre::ensure!(
        column_layout(&service, owner, "Todo").await? == layout_of(&[("A", 0), ("B", 1)]),
        "owner board changed by another owner's move"
    );
    eyre::ensure!(
        column_layout(&service, other, "Todo").await? == layout_of(&[("Y", 0), ("X", 1)]),
        "other board not reordered"
    );
    Ok(())
}
