//! Store-level error model.

use thiserror::Error;

use stockroom_core::LedgerError;

/// Result type used across the store layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a catalog store operation.
///
/// Domain outcomes (not found, insufficient stock, category in use, stale
/// snapshot) surface through the wrapped [`LedgerError`] so callers handle
/// one taxonomy. Transport and schema failures get their own kinds and are
/// never retried silently.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A deterministic domain outcome reported by the store.
    #[error(transparent)]
    Domain(#[from] LedgerError),

    /// The store could not be reached or the call failed in transit.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A schema constraint rejected the write and no domain kind covers it.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// The wrapped domain error, when this is a domain outcome.
    pub fn as_domain(&self) -> Option<&LedgerError> {
        match self {
            StoreError::Domain(e) => Some(e),
            _ => None,
        }
    }
}
