//! Domain model for the ordered task board.
//!
//! The board domain models tasks, the columns they sit in, and the pure
//! planning of position changes, while keeping all infrastructure concerns
//! outside of the domain boundary.

mod error;
mod ids;
mod plan;
mod task;

pub use error::TaskDomainError;
pub use ids::{ColumnStatus, Position, TaskId};
pub use plan::{MovePlan, PositionChange, plan_move, plan_normalization, plan_removal};
pub use task::{PersistedTaskData, Task, TaskDetails, TaskDetailsPatch};
