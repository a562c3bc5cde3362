//! Unit tests for the ordered task board.

mod support;
