//! Caller resolver implementations.

pub mod jwt;

pub use jwt::JwtCallerResolver;
