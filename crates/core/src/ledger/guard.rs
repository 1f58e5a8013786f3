//! Per-account concurrency guard.

use std::sync::Arc;

use dashmap::DashMap;
use tally_shared::types::AccountId;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Grants at-most-one active mutation per account while letting unrelated
/// accounts proceed fully in parallel.
///
/// One reader-writer lock per account identifier, created lazily on first
/// touch and retained for the account's lifetime. Tokio's `RwLock` queues
/// waiters fairly, so mutators cannot be starved by a stream of readers.
///
/// Acquisition is the only point where a caller may suspend. Dropping an
/// acquire future while it waits abandons the wait with no side effect, and
/// a held guard is released on drop on every exit path.
#[derive(Debug, Default)]
pub struct AccountGuard {
    locks: DashMap<AccountId, Arc<RwLock<()>>>,
}

impl AccountGuard {
    /// Creates an empty guard registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a guard registry with an initial capacity hint.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            locks: DashMap::with_capacity(capacity),
        }
    }

    /// Waits until no other mutation or read holds the account, then returns
    /// an exclusive handle. Released on drop.
    pub async fn acquire_mutation(&self, account_id: AccountId) -> OwnedRwLockWriteGuard<()> {
        self.lock_for(account_id).write_owned().await
    }

    /// Waits until no mutation holds the account, then returns a shared
    /// handle. Reads of the same account may overlap each other but never an
    /// in-flight mutation. Released on drop.
    pub async fn acquire_read(&self, account_id: AccountId) -> OwnedRwLockReadGuard<()> {
        self.lock_for(account_id).read_owned().await
    }

    /// Returns the number of accounts with a registered lock.
    #[must_use]
    pub fn tracked_accounts(&self) -> usize {
        self.locks.len()
    }

    fn lock_for(&self, account_id: AccountId) -> Arc<RwLock<()>> {
        // The map entry ref must be dropped before awaiting the lock.
        self.locks.entry(account_id).or_default().value().clone()
    }
}
