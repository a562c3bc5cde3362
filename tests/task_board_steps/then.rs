//! Then steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async, titles};
use rstest_bdd_macros::then;
use taskboard::task::{domain::TaskDomainError, services::TaskServiceError};

#[then(r#"column "{status}" reads "{list}""#)]
fn column_reads(world: &TaskBoardWorld, status: String, list: String) -> Result<(), eyre::Report> {
    let column = run_async(world.service.list_tasks_by_status(world.owner, &status))?;
    let actual: Vec<&str> = column.iter().map(|task| task.title()).collect();
    let expected = titles(&list);

    if actual != expected {
        return Err(eyre::eyre!(
            "column {status}: expected {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"column "{status}" is dense"#)]
fn column_is_dense(world: &TaskBoardWorld, status: String) -> Result<(), eyre::Report> {
    let column = run_async(world.service.list_tasks_by_status(world.owner, &status))?;
    for (index, task) in column.iter().enumerate() {
        eyre::ensure!(
            task.position().index() == index,
            "task {} listed at {index} has position {}",
            task.title(),
            task.position()
        );
    }
    Ok(())
}

#[then("the move fails with an invalid argument error")]
fn move_fails_with_invalid_argument(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;

    if !matches!(
        result,
        Err(TaskServiceError::InvalidArgument(
            TaskDomainError::NegativePosition(_)
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidArgument error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the move fails with an unauthorized error")]
fn move_fails_with_unauthorized(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;

    if !matches!(result, Err(TaskServiceError::Unauthorized(_))) {
        return Err(eyre::eyre!("expected Unauthorized error, got {result:?}"));
    }
    Ok(())
}
