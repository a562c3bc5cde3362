//! Step definitions for ordered task board scenarios.

pub mod then;
pub mod world;
