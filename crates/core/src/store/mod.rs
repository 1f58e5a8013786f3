//! Collaborator storage interfaces.
//!
//! The ledger service owns all decision logic; these traits own physical
//! storage of balances and history records. Neither performs its own
//! read-modify-write synchronization - atomicity is enforced by the caller
//! holding the account's guard.

pub mod balance;
pub mod error;
pub mod history;

pub use balance::{BalanceStore, DynBalanceStore, InMemoryBalanceStore};
pub use error::StoreError;
pub use history::{DynHistoryLog, HistoryLog, InMemoryHistoryLog};
