//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The column status is empty after trimming.
    #[error("task status must not be empty")]
    EmptyStatus,

    /// A negative position was supplied.
    #[error("invalid position {0}, expected a non-negative integer")]
    NegativePosition(i64),

    /// The position exceeds what the persisted schema can hold.
    #[error("position {0} is out of range")]
    PositionOutOfRange(i64),
}
