//! Ordered task board.
//!
//! Tasks live in named status columns (`Todo`, `In Progress`, `Done`, ...)
//! of their owner's board. Within each column positions stay dense: a
//! column of `n` tasks always holds positions `0..n`, across creation,
//! edits, drag-and-drop moves and deletion. The module follows hexagonal
//! architecture:
//!
//! - Domain types and the re-sequencing planner in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The ordering engine and service facade in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
