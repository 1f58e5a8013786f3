//! Transaction record domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, RecordId};

/// Kind of accepted mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Points were added to the account.
    Charge,
    /// Points were spent from the account.
    Use,
}

/// One immutable audit entry describing an accepted mutation.
///
/// Records are created exactly once per successful charge/use call and are
/// never mutated or removed. Rejected operations produce no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier, monotonically increasing across the log.
    pub id: RecordId,
    /// The account this record belongs to.
    pub account_id: AccountId,
    /// Amount charged or used. Always positive.
    pub amount: u64,
    /// Whether this was a charge or a use.
    pub kind: TransactionKind,
    /// When the mutation was committed.
    pub recorded_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Returns the signed effect on the balance (positive for charge,
    /// negative for use).
    #[must_use]
    pub fn signed_amount(&self) -> i128 {
        match self.kind {
            TransactionKind::Charge => i128::from(self.amount),
            TransactionKind::Use => -i128::from(self.amount),
        }
    }
}
