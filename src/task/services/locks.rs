//! Per-owner write serialization.
//!
//! A reorder issues several independent store writes. Holding the owner's
//! lock across the read-plan-write sequence keeps concurrent mutations of
//! the same board from interleaving. Both columns of a cross-column move
//! belong to one owner, so a single lock covers them.

use crate::identity::domain::OwnerId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Number of entries after which dead lock handles are pruned.
const PRUNE_THRESHOLD: usize = 128;

/// Table of per-owner async write locks.
#[derive(Debug, Clone, Default)]
pub struct OwnerLocks {
    locks: Arc<Mutex<HashMap<OwnerId, Weak<AsyncMutex<()>>>>>,
}

/// Proof that the write lock of one owner is held.
///
/// Dropping the guard releases the lock.
#[derive(Debug)]
pub struct OwnerGuard {
    owner_id: OwnerId,
    _guard: OwnedMutexGuard<()>,
}

impl OwnerGuard {
    /// Returns the owner whose lock is held.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }
}

impl OwnerLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and takes the write lock of `owner_id`.
    pub async fn acquire(&self, owner_id: OwnerId) -> OwnerGuard {
        let lock = self.lock_for(owner_id);
        let guard = lock.lock_owned().await;
        OwnerGuard {
            owner_id,
            _guard: guard,
        }
    }

    fn lock_for(&self, owner_id: OwnerId) -> Arc<AsyncMutex<()>> {
        // Poisoning cannot leave a map of weak handles inconsistent.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        if locks.len() > PRUNE_THRESHOLD {
            locks.retain(|_, weak| weak.strong_count() > 0);
        }

        if let Some(existing) = locks.get(&owner_id).and_then(Weak::upgrade) {
            return existing;
        }

        let lock = Arc::new(AsyncMutex::new(()));
        locks.insert(owner_id, Arc::downgrade(&lock));
        lock
    }
}
