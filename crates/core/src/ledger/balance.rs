//! Account balance domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

/// The current point balance of one account.
///
/// Balances are unsigned, so non-negativity is structural; all arithmetic is
/// checked so an overflow can never wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account this balance belongs to.
    pub account_id: AccountId,
    /// Current point balance.
    pub points: u64,
    /// When the balance was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AccountBalance {
    /// Creates a balance with the given point count.
    #[must_use]
    pub const fn new(account_id: AccountId, points: u64, updated_at: DateTime<Utc>) -> Self {
        Self {
            account_id,
            points,
            updated_at,
        }
    }

    /// The zero balance returned for accounts that have never been touched.
    #[must_use]
    pub fn empty(account_id: AccountId) -> Self {
        Self {
            account_id,
            points: 0,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }

    /// Returns the balance after charging `amount`, or `None` on overflow.
    #[must_use]
    pub fn charged(&self, amount: u64, at: DateTime<Utc>) -> Option<Self> {
        Some(Self {
            account_id: self.account_id,
            points: self.points.checked_add(amount)?,
            updated_at: at,
        })
    }

    /// Returns the balance after using `amount`, or `None` if the account
    /// does not hold enough points.
    #[must_use]
    pub fn used(&self, amount: u64, at: DateTime<Utc>) -> Option<Self> {
        Some(Self {
            account_id: self.account_id,
            points: self.points.checked_sub(amount)?,
            updated_at: at,
        })
    }
}
