//! Ledger error types.
//!
//! Every failure is a typed outcome; nothing in the guarded path panics or
//! skips guard release.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Amount is zero or negative; no state change.
    #[error("amount must be positive, got {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: i64,
    },

    /// Use amount exceeds current balance; no state change, no record.
    #[error("insufficient balance: have {balance}, requested {requested}")]
    InsufficientBalance {
        /// The balance at the time of the call.
        balance: u64,
        /// The requested use amount.
        requested: u64,
    },

    /// Charge would overflow the representable balance range; no state change.
    #[error("charging {amount} onto balance {balance} would overflow")]
    AmountOverflow {
        /// The balance at the time of the call.
        balance: u64,
        /// The requested charge amount.
        amount: u64,
    },

    /// A collaborator store could not be reached.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for caller-facing responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
            Self::Store(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// Validation failures are caller errors; only collaborator
    /// unavailability is worth retrying as-is.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
