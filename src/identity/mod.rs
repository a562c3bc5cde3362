//! Caller identity and ownership checks.
//!
//! Every board record is owned by exactly one user. This module provides the
//! owner identifier, the single authorization predicate applied to every
//! owned resource, and the port used to turn an external credential into an
//! owner identifier:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
