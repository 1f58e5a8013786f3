//! Store error types.

use thiserror::Error;

/// Collaborator storage errors.
///
/// The in-memory implementations never fail; this type exists so that a
/// real storage backend can report unavailability through the same boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create an unavailability error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}
