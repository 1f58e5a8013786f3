//! Point ledger logic.
//!
//! This module implements the core ledger functionality:
//! - Account balances with checked point arithmetic
//! - Immutable transaction records (the audit trail)
//! - The per-account concurrency guard
//! - The ledger service with charge/use business rules
//! - Error types for ledger operations

pub mod balance;
pub mod error;
pub mod guard;
pub mod record;
pub mod service;

#[cfg(test)]
mod service_props;

pub use balance::AccountBalance;
pub use error::LedgerError;
pub use guard::AccountGuard;
pub use record::{TransactionKind, TransactionRecord};
pub use service::PointLedgerService;
