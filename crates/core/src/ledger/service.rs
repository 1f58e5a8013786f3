//! Point ledger service.
//!
//! Business rules for balance queries, history queries, charging, and using,
//! built entirely on top of the per-account guard. The service is the only
//! actor that mutates the collaborator stores, and it only does so while
//! holding the mutation guard for the relevant account.

use chrono::Utc;
use tally_shared::LedgerConfig;
use tally_shared::types::AccountId;
use tracing::{debug, warn};

use super::balance::AccountBalance;
use super::error::LedgerError;
use super::guard::AccountGuard;
use super::record::{TransactionKind, TransactionRecord};
use crate::store::{
    DynBalanceStore, DynHistoryLog, InMemoryBalanceStore, InMemoryHistoryLog, StoreError,
};

/// Charge/use/query operations over guarded point balances.
///
/// For a fixed account, successful operations are applied in the order each
/// one acquired the mutation guard, so the sequence of returned balances is
/// linearizable per account. The balance write and the history append happen
/// inside the same guarded section and share one timestamp, so no reader can
/// observe one without the other.
pub struct PointLedgerService {
    guard: AccountGuard,
    balances: DynBalanceStore,
    history: DynHistoryLog,
}

impl PointLedgerService {
    /// Creates a service over the given collaborator stores.
    #[must_use]
    pub fn new(balances: DynBalanceStore, history: DynHistoryLog) -> Self {
        Self {
            guard: AccountGuard::new(),
            balances,
            history,
        }
    }

    /// Creates a service over the given stores, sized per configuration.
    #[must_use]
    pub fn with_config(
        config: &LedgerConfig,
        balances: DynBalanceStore,
        history: DynHistoryLog,
    ) -> Self {
        Self {
            guard: AccountGuard::with_capacity(config.guard_capacity),
            balances,
            history,
        }
    }

    /// Creates a service backed by fresh in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            std::sync::Arc::new(InMemoryBalanceStore::new()),
            std::sync::Arc::new(InMemoryHistoryLog::new()),
        )
    }

    /// Returns the current balance, zero if the account has never been
    /// touched.
    ///
    /// # Errors
    ///
    /// Fails only if a collaborator store is unavailable.
    pub async fn balance(&self, account_id: AccountId) -> Result<AccountBalance, LedgerError> {
        let _read = self.guard.acquire_read(account_id).await;
        Ok(self.balances.read(account_id)?)
    }

    /// Returns the account's transaction records, oldest first.
    ///
    /// # Errors
    ///
    /// Fails only if a collaborator store is unavailable.
    pub async fn history(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        let _read = self.guard.acquire_read(account_id).await;
        Ok(self.history.read_all(account_id)?)
    }

    /// Charges `amount` points onto the account and returns the updated
    /// balance.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`.
    /// - `AmountOverflow` if the balance cannot represent the result; no
    ///   mutation is performed.
    /// - `Store` if a collaborator is unavailable.
    pub async fn charge(
        &self,
        account_id: AccountId,
        amount: i64,
    ) -> Result<AccountBalance, LedgerError> {
        let amount = validate_amount(amount)?;

        let _mutation = self.guard.acquire_mutation(account_id).await;
        let current = self.balances.read(account_id)?;
        let now = Utc::now();

        let updated = current
            .charged(amount, now)
            .ok_or(LedgerError::AmountOverflow {
                balance: current.points,
                amount,
            })?;

        let written = self.balances.write(updated)?;
        self.commit_record(current, account_id, amount, TransactionKind::Charge, now)?;

        debug!(
            account_id = %account_id,
            amount,
            balance = written.points,
            "points charged"
        );
        Ok(written)
    }

    /// Spends `amount` points from the account and returns the updated
    /// balance.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`.
    /// - `InsufficientBalance` if the account holds fewer than `amount`
    ///   points; no mutation, no record.
    /// - `Store` if a collaborator is unavailable.
    pub async fn use_points(
        &self,
        account_id: AccountId,
        amount: i64,
    ) -> Result<AccountBalance, LedgerError> {
        let amount = validate_amount(amount)?;

        let _mutation = self.guard.acquire_mutation(account_id).await;
        let current = self.balances.read(account_id)?;
        let now = Utc::now();

        let Some(updated) = current.used(amount, now) else {
            warn!(
                account_id = %account_id,
                amount,
                balance = current.points,
                "use rejected: insufficient balance"
            );
            return Err(LedgerError::InsufficientBalance {
                balance: current.points,
                requested: amount,
            });
        };

        let written = self.balances.write(updated)?;
        self.commit_record(current, account_id, amount, TransactionKind::Use, now)?;

        debug!(
            account_id = %account_id,
            amount,
            balance = written.points,
            "points used"
        );
        Ok(written)
    }

    /// Appends the record paired with a balance write that already happened.
    /// A failed append must not leave the balance update observable, so the
    /// prior balance is written back before the failure propagates.
    fn commit_record(
        &self,
        previous: AccountBalance,
        account_id: AccountId,
        amount: u64,
        kind: TransactionKind,
        now: chrono::DateTime<Utc>,
    ) -> Result<TransactionRecord, StoreError> {
        match self.history.append(account_id, amount, kind, now) {
            Ok(record) => Ok(record),
            Err(err) => {
                self.balances.write(previous)?;
                Err(err)
            }
        }
    }
}

fn validate_amount(amount: i64) -> Result<u64, LedgerError> {
    u64::try_from(amount)
        .ok()
        .filter(|amount| *amount > 0)
        .ok_or(LedgerError::InvalidAmount { amount })
}
