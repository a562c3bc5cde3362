//! Port for resolving an external credential into an owner identifier.

use super::domain::OwnerId;
use thiserror::Error;

/// Resolves the acting user from a credential presented by the transport.
pub trait CallerResolver: Send + Sync {
    /// Validates `credential` and returns the owner it identifies.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the credential is missing, malformed,
    /// expired or names no valid owner.
    fn resolve(&self, credential: &str) -> Result<OwnerId, IdentityError>;
}

/// Errors returned while resolving a caller.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No credential was supplied.
    #[error("missing credential")]
    MissingCredential,

    /// The token failed signature, expiry or structural validation.
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// The token subject is not an owner identifier.
    #[error("token subject '{0}' is not a valid owner identifier")]
    InvalidSubject(String),
}

/// Extracts the token from an `Authorization` header value.
///
/// Accepts both `Bearer` and `bearer` schemes.
///
/// # Errors
///
/// Returns [`IdentityError::MissingCredential`] when the scheme is absent or
/// the token is empty.
pub fn bearer_token(header_value: &str) -> Result<&str, IdentityError> {
    let token = header_value
        .strip_prefix("Bearer ")
        .or_else(|| header_value.strip_prefix("bearer "))
        .map(str::trim)
        .unwrap_or_default();
    if token.is_empty() {
        return Err(IdentityError::MissingCredential);
    }
    Ok(token)
}
