//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A value failed validation (e.g. malformed or empty input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested quantity was non-positive or not representable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A requested decrement exceeds the quantity on hand.
    #[error("insufficient stock (on hand: {on_hand}, requested: {requested})")]
    InsufficientStock { on_hand: i64, requested: i64 },

    /// A discount percentage outside its valid range.
    #[error("invalid discount: {0}")]
    InvalidDiscount(String),

    /// A tax rate percentage outside its valid range.
    #[error("invalid tax rate: {0}")]
    InvalidTaxRate(String),

    /// Attempted deletion of a category that still has dependent products.
    #[error("category has dependent products")]
    CategoryInUse,

    /// A referenced record does not resolve (stale or wrong id).
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. stale quantity snapshot on a conditional write).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn invalid_discount(msg: impl Into<String>) -> Self {
        Self::InvalidDiscount(msg.into())
    }

    pub fn invalid_tax_rate(msg: impl Into<String>) -> Self {
        Self::InvalidTaxRate(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
