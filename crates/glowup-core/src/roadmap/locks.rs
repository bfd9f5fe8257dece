//! Per-owner write serialization.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async mutex per owner, created on first use.
///
/// Owners never contend with each other. The map only grows; an entry is a
/// few bytes and the set of owners served by one process is small.
#[derive(Default)]
pub(crate) struct OwnerLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl OwnerLocks {
    /// Waits until no other write for `owner` is in flight.
    pub(crate) async fn acquire(&self, owner: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(locks.entry(owner.to_string()).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(locks: &OwnerLocks, owner: &str) -> Arc<AsyncMutex<()>> {
        let map = locks.locks.lock().unwrap();
        Arc::clone(&map[owner])
    }

    #[tokio::test]
    async fn test_same_owner_serializes() {
        let locks = OwnerLocks::default();
        let guard = locks.acquire("ana").await;
        assert!(entry(&locks, "ana").try_lock().is_err());

        drop(guard);
        assert!(entry(&locks, "ana").try_lock().is_ok());
    }

    #[tokio::test]
    async fn test_different_owners_do_not_contend() {
        let locks = OwnerLocks::default();
        let _ana = locks.acquire("ana").await;
        let _bo = locks.acquire("bo").await;

        assert!(entry(&locks, "ana").try_lock().is_err());
        assert!(entry(&locks, "bo").try_lock().is_err());
    }
}
