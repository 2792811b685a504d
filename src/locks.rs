//! Per-user write serialization for cart mutations.
//!
//! Each user id maps to an async mutex that is held across a whole
//! read-modify-write of that user's cart. Entries are dropped from the map
//! as soon as nobody holds or waits on them. The lock is process-local.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type SlotMap = DashMap<u64, UserSlot>;

/// Lock for one user plus the number of tasks registered on it (holding or
/// waiting). The count only changes under the map's shard lock.
#[derive(Debug, Default)]
struct UserSlot {
    mutex: Arc<Mutex<()>>,
    registered: usize,
}

#[derive(Debug, Clone, Default)]
pub struct UserLocks {
    locks: Arc<SlotMap>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `user_id`'s cart.
    ///
    /// Cancel safe: dropping the returned future while it waits unregisters
    /// the caller, so the map entry still goes away with the last task.
    pub async fn acquire(&self, user_id: u64) -> UserWriteGuard {
        let mutex = {
            let mut slot = self.locks.entry(user_id).or_default();
            slot.registered += 1;
            Arc::clone(&slot.mutex)
        };
        let registration = Registration {
            user_id,
            locks: Arc::clone(&self.locks),
        };
        let guard = mutex.lock_owned().await;
        UserWriteGuard {
            _guard: guard,
            _registration: registration,
        }
    }

    /// Number of users with a held or awaited lock.
    pub fn active(&self) -> usize {
        self.locks.len()
    }
}

/// One task's claim on a map entry, released on drop whether or not the
/// lock was ever granted.
#[derive(Debug)]
struct Registration {
    user_id: u64,
    locks: Arc<SlotMap>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.locks.remove_if_mut(&self.user_id, |_, slot| {
            slot.registered -= 1;
            slot.registered == 0
        });
    }
}

/// Held for the duration of one cart mutation.
#[derive(Debug)]
pub struct UserWriteGuard {
    // Fields drop in order: the mutex is released before the entry is
    // unregistered.
    _guard: OwnedMutexGuard<()>,
    _registration: Registration,
}
