use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{LedgerError, LedgerResult, Money, RecordId};

use crate::category::CategoryId;

/// Product identifier (store-assigned).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub RecordId);

impl ProductId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0.get()
    }
}

impl From<i64> for ProductId {
    fn from(raw: i64) -> Self {
        Self(RecordId::new(raw))
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A stocked item with quantity on hand and a unit price.
///
/// Invariant: `quantity` is never negative after any mutation; the ledger's
/// adjustment operation and the store's conditional update both enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub category_id: CategoryId,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Derived line value: quantity on hand × unit price.
    pub fn line_value(&self) -> Money {
        self.unit_price.mul_quantity(self.quantity)
    }
}

/// Draft of a product before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub category_id: CategoryId,
}

impl NewProduct {
    pub fn validate(&self) -> LedgerResult<()> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::validation("product name cannot be empty"));
        }
        if self.quantity < 0 {
            return Err(LedgerError::invalid_quantity(
                "initial quantity cannot be negative",
            ));
        }
        Ok(())
    }
}
