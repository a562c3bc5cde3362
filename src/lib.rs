//! Taskboard: ordered kanban task board for a personal productivity backend.
//!
//! This crate keeps each user's tasks correctly ordered within named status
//! columns as tasks are created, edited, recolumned, reordered and deleted.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, tokens)
//!
//! # Modules
//!
//! - [`task`]: Task records, column ordering and the board service
//! - [`identity`]: Owner identifiers, ownership checks and caller resolution
//! - [`config`]: Database and token settings

pub mod config;
pub mod identity;
pub mod task;
