//! HS256 bearer token validation.
//!
//! Tokens are issued elsewhere. A valid token carries the owner UUID in
//! `sub` and an `exp` expiry in unix seconds.

use crate::config::AuthConfig;
use crate::identity::{
    domain::OwnerId,
    ports::{CallerResolver, IdentityError},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// Resolves callers from HS256-signed JWTs.
#[derive(Clone)]
pub struct JwtCallerResolver {
    key: DecodingKey,
    validation: Validation,
}

impl JwtCallerResolver {
    /// Creates a resolver from a shared secret and an expiry leeway.
    #[must_use]
    pub fn from_secret(secret: &str, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Creates a resolver from the auth section of the board configuration.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_secret(config.jwt_secret(), config.leeway_secs())
    }
}

impl fmt::Debug for JwtCallerResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtCallerResolver")
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

impl CallerResolver for JwtCallerResolver {
    fn resolve(&self, credential: &str) -> Result<OwnerId, IdentityError> {
        if credential.trim().is_empty() {
            return Err(IdentityError::MissingCredential);
        }
        let data = jsonwebtoken::decode::<Claims>(credential, &self.key, &self.validation)?;
        let subject = data.claims.sub;
        Uuid::parse_str(&subject)
            .map(OwnerId::from_uuid)
            .map_err(|_| IdentityError::InvalidSubject(subject))
    }
}
