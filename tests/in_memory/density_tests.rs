//! Arbitrary operation sequences must leave every column dense.

use super::helpers::{BoardService, ensure_dense};
use mockable::DefaultClock;
use proptest::prelude::*;
use proptest::sample::Index;
use std::sync::Arc;
use taskboard::identity::domain::OwnerId;
use taskboard::task::adapters::memory::InMemoryTaskStore;
use taskboard::task::domain::TaskDetailsPatch;
use taskboard::task::services::{
    CreateTaskRequest, MoveTaskRequest, TaskService, UpdateTaskRequest,
};

const COLUMNS: [&str; 3] = ["Todo", "Doing", "Done"];

/// One board mutation. `pick` selects an existing task.
#[derive(Debug, Clone)]
enum Op {
    Create { column: &'static str },
    Move { pick: Index, column: &'static str, position: i64 },
    Update { pick: Index, column: &'static str },
    Delete { pick: Index },
}

fn arb_column() -> impl Strategy<Value = &'static str> {
    prop::sample::select(COLUMNS.to_vec())
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arb_column().prop_map(|column| Op::Create { column }),
        3 => (any::<Index>(), arb_column(), 0_i64..8)
            .prop_map(|(pick, column, position)| Op::Move { pick, column, position }),
        2 => (any::<Index>(), arb_column()).prop_map(|(pick, column)| Op::Update { pick, column }),
        1 => any::<Index>().prop_map(|pick| Op::Delete { pick }),
    ]
}

async fn check_board(
    service: &BoardService,
    owner: OwnerId,
    expected_total: usize,
) -> Result<(), eyre::Report> {
    let mut total = 0;
    for status in COLUMNS {
        let column = service.list_tasks_by_status(owner, status).await?;
        ensure_dense(&column)?;
        total += column.len();
    }
    eyre::ensure!(
        total == expected_total,
        "board holds {total} tasks, expected {expected_total}"
    );
    Ok(())
}

async fn apply_ops(ops: Vec<Op>) -> Result<(), eyre::Report> {
    let service: BoardService =
        TaskService::new(Arc::new(InMemoryTaskStore::new()), Arc::new(DefaultClock));
    let owner = OwnerId::new();
    let mut total = 0_usize;

    for (step, op) in ops.into_iter().enumerate() {
        let board = service.list_tasks(owner).await?;
        let picked = |pick: &Index| (!board.is_empty()).then(|| pick.get(&board).id());

        match op {
            Op::Create { column } => {
                service
                    .create_task(owner, CreateTaskRequest::new(column, format!("task {step}")))
                    .await?;
                total += 1;
            }
            Op::Move {
                pick,
                column,
                position,
            } => {
                if let Some(task_id) = picked(&pick) {
                    service
                        .move_task(owner, task_id, MoveTaskRequest::new(column, position))
                        .await?;
                }
            }
            Op::Update { pick, column } => {
                if let Some(task_id) = picked(&pick) {
                    let request = UpdateTaskRequest::new(
                        TaskDetailsPatch::new().with_title(format!("edited at {step}")),
                    )
                    .with_status(column);
                    service.update_task(owner, task_id, request).await?;
                }
            }
            Op::Delete { pick } => {
                if let Some(task_id) = picked(&pick) {
                    service.delete_task(owner, task_id).await?;
                    total -= 1;
                }
            }
        }

        check_board(&service, owner, total).await?;
    }
    Ok(())
}

fn replay(ops: Vec<Op>) -> Result<(), eyre::Report> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(apply_ops(ops))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arbitrary_operations_keep_columns_dense(ops in prop::collection::vec(arb_op(), 1..60)) {
        replay(ops).map_err(|err| TestCaseError::fail(format!("{err:?}")))?;
    }
}
