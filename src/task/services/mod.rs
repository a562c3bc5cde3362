//! Application services for the ordered task board.

mod board;
mod locks;
mod ordering;

pub use board::{
    CreateTaskRequest, MoveTaskRequest, TaskService, TaskServiceError, TaskServiceResult,
    UpdateTaskRequest,
};
pub use locks::{OwnerGuard, OwnerLocks};
pub use ordering::{OrderingEngine, OrderingError, OrderingResult};
