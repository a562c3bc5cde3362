//! Re-sequencing plans for board columns.
//!
//! Planning is pure: given the current contents of the affected columns it
//! computes which tasks must take which position so that every column stays
//! dense (`0..n`). Only tasks whose position actually changes appear in a
//! plan, so tasks outside the affected range are never written.

use super::{Position, Task, TaskDomainError, TaskId};

/// New position for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChange {
    /// Task to reposition.
    pub task_id: TaskId,
    /// Position the task must take.
    pub position: Position,
}

/// Outcome of planning a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovePlan {
    /// The task already sits at the requested slot.
    Unchanged,
    /// Neighbours to shift and the slot the moved task takes.
    Apply {
        /// Position changes for tasks other than the moved one.
        shifts: Vec<PositionChange>,
        /// Final position of the moved task.
        target: Position,
    },
}

/// Plans moving `moving` to `requested` in its own column (`destination`
/// is `None`) or in another column.
///
/// `requested` beyond the destination length appends to the end.
///
/// # Errors
///
/// Returns [`TaskDomainError::PositionOutOfRange`] when a column is too
/// large to index.
pub fn plan_move(
    source: &[Task],
    destination: Option<&[Task]>,
    moving: &Task,
    requested: Position,
) -> Result<MovePlan, TaskDomainError> {
    let moving_id = moving.id();
    match destination {
        None => {
            let mut ordered = without(source, moving_id);
            let target = insert_at(&mut ordered, moving, requested)?;
            let shifts = resequence(ordered, Some(moving_id))?;
            if shifts.is_empty() && moving.position() == target {
                return Ok(MovePlan::Unchanged);
            }
            Ok(MovePlan::Apply { shifts, target })
        }
        Some(destination_column) => {
            let mut shifts = resequence(without(source, moving_id), Some(moving_id))?;
            let mut ordered = without(destination_column, moving_id);
            let target = insert_at(&mut ordered, moving, requested)?;
            shifts.extend(resequence(ordered, Some(moving_id))?);
            Ok(MovePlan::Apply { shifts, target })
        }
    }
}

/// Plans closing the gap left by removing `removed` from `column`.
///
/// # Errors
///
/// Returns [`TaskDomainError::PositionOutOfRange`] when the column is too
/// large to index.
pub fn plan_removal(
    column: &[Task],
    removed: TaskId,
) -> Result<Vec<PositionChange>, TaskDomainError> {
    resequence(without(column, removed), None)
}

/// Plans rewriting `column` to `0..n` in its current order.
///
/// # Errors
///
/// Returns [`TaskDomainError::PositionOutOfRange`] when the column is too
/// large to index.
pub fn plan_normalization(column: &[Task]) -> Result<Vec<PositionChange>, TaskDomainError> {
    resequence(sorted(column), None)
}

fn sorted(column: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = column.iter().collect();
    ordered.sort_by(|left, right| Task::column_order(left, right));
    ordered
}

fn without(column: &[Task], excluded: TaskId) -> Vec<&Task> {
    let mut ordered = sorted(column);
    ordered.retain(|task| task.id() != excluded);
    ordered
}

/// Inserts `task` at `requested`, clamped to the end, and returns the slot.
fn insert_at<'a>(
    ordered: &mut Vec<&'a Task>,
    task: &'a Task,
    requested: Position,
) -> Result<Position, TaskDomainError> {
    let index = requested.index().min(ordered.len());
    ordered.insert(index, task);
    Position::from_index(index)
}

fn resequence<'a>(
    ordered: impl IntoIterator<Item = &'a Task>,
    skip: Option<TaskId>,
) -> Result<Vec<PositionChange>, TaskDomainError> {
    let mut changes = Vec::new();
    for (index, task) in ordered.into_iter().enumerate() {
        let position = Position::from_index(index)?;
        if Some(task.id()) != skip && task.position() != position {
            changes.push(PositionChange {
                task_id: task.id(),
                position,
            });
        }
    }
    Ok(changes)
}
