//! History log interface and in-memory implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tally_shared::types::{AccountId, RecordId};

use super::error::StoreError;
use crate::ledger::{TransactionKind, TransactionRecord};

/// Append-only storage of transaction records, keyed by account.
pub trait HistoryLog: Send + Sync {
    /// Appends a record, assigning it a unique, monotonically increasing id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store is unavailable.
    fn append(
        &self,
        account_id: AccountId,
        amount: u64,
        kind: TransactionKind,
        recorded_at: DateTime<Utc>,
    ) -> Result<TransactionRecord, StoreError>;

    /// Returns all records for an account in insertion order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store is unavailable.
    fn read_all(&self, account_id: AccountId) -> Result<Vec<TransactionRecord>, StoreError>;
}

/// Shared handle to a history log.
pub type DynHistoryLog = Arc<dyn HistoryLog>;

/// In-memory history table.
#[derive(Debug)]
pub struct InMemoryHistoryLog {
    rows: DashMap<AccountId, Vec<TransactionRecord>>,
    next_id: AtomicU64,
}

impl InMemoryHistoryLog {
    /// Creates an empty log. Record ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryHistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog for InMemoryHistoryLog {
    fn append(
        &self,
        account_id: AccountId,
        amount: u64,
        kind: TransactionKind,
        recorded_at: DateTime<Utc>,
    ) -> Result<TransactionRecord, StoreError> {
        let id = RecordId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = TransactionRecord {
            id,
            account_id,
            amount,
            kind,
            recorded_at,
        };
        self.rows.entry(account_id).or_default().push(record);
        Ok(record)
    }

    fn read_all(&self, account_id: AccountId) -> Result<Vec<TransactionRecord>, StoreError> {
        Ok(self
            .rows
            .get(&account_id)
            .map(|rows| rows.value().clone())
            .unwrap_or_default())
    }
}
