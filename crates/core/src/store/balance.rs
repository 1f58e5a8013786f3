//! Balance store interface and in-memory implementation.

use std::sync::Arc;

use dashmap::DashMap;
use tally_shared::types::AccountId;

use super::error::StoreError;
use crate::ledger::AccountBalance;

/// Storage of current balances, keyed by account.
///
/// Implementations provide point lookup and unconditional upsert only. The
/// ledger service is the sole writer and always calls in under a held
/// mutation guard for the account.
pub trait BalanceStore: Send + Sync {
    /// Returns the current balance for an account.
    ///
    /// Unknown accounts yield a zero balance without materializing a row.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store is unavailable.
    fn read(&self, account_id: AccountId) -> Result<AccountBalance, StoreError>;

    /// Upserts a balance and returns the written value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store is unavailable.
    fn write(&self, balance: AccountBalance) -> Result<AccountBalance, StoreError>;
}

/// Shared handle to a balance store.
pub type DynBalanceStore = Arc<dyn BalanceStore>;

/// In-memory balance table.
///
/// Rows are created on first successful mutation, never on lookup, so the
/// table stays sparse for accounts that have only been queried.
#[derive(Debug, Default)]
pub struct InMemoryBalanceStore {
    rows: DashMap<AccountId, AccountBalance>,
}

impl InMemoryBalanceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of materialized accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no account has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl BalanceStore for InMemoryBalanceStore {
    fn read(&self, account_id: AccountId) -> Result<AccountBalance, StoreError> {
        Ok(self
            .rows
            .get(&account_id)
            .map_or_else(|| AccountBalance::empty(account_id), |row| *row))
    }

    fn write(&self, balance: AccountBalance) -> Result<AccountBalance, StoreError> {
        self.rows.insert(balance.account_id, balance);
        Ok(balance)
    }
}
