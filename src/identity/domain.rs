//! Owner identifiers and the shared ownership predicate.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Identifier of the user owning a board record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(Uuid);

impl OwnerId {
    /// Creates a new random owner identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an owner identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for OwnerId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record that belongs to a single owner.
pub trait Owned {
    /// Returns the identifier of the owning user.
    fn owner_id(&self) -> OwnerId;
}

/// Returned when a caller touches a resource owned by someone else.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("resource owned by {owner} is not accessible to {caller}")]
pub struct NotOwnedError {
    /// Owner recorded on the resource.
    pub owner: OwnerId,
    /// Caller that attempted the access.
    pub caller: OwnerId,
}

/// Checks that `resource` belongs to `caller`.
///
/// # Errors
///
/// Returns [`NotOwnedError`] when the owners differ.
pub fn ensure_owned_by<T>(resource: &T, caller: OwnerId) -> Result<(), NotOwnedError>
where
    T: Owned + ?Sized,
{
    let owner = resource.owner_id();
    if owner == caller {
        Ok(())
    } else {
        Err(NotOwnedError { owner, caller })
    }
}
