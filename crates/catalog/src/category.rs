use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{LedgerError, LedgerResult, RecordId};

use crate::product::Product;

/// Category identifier (store-assigned).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub RecordId);

impl CategoryId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0.get()
    }
}

impl From<i64> for CategoryId {
    fn from(raw: i64) -> Self {
        Self(RecordId::new(raw))
    }
}

impl core::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A named grouping that products belong to (many products per category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Draft of a category before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    pub fn validate(&self) -> LedgerResult<()> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::validation("category name cannot be empty"));
        }
        Ok(())
    }
}

/// True iff no product in `products` references `category`.
///
/// Lookups are keyed by identity, never by name (two categories may share a
/// display name).
pub fn can_delete_category(category: &Category, products: &[Product]) -> bool {
    !products.iter().any(|p| p.category_id == category.id)
}

/// Deletion guard: `CategoryInUse` when any product still references the
/// category. The store's foreign key rejects the delete as well; this runs
/// first so the caller gets the typed error without a round trip.
pub fn ensure_deletable(category: &Category, products: &[Product]) -> LedgerResult<()> {
    if can_delete_category(category, products) {
        Ok(())
    } else {
        Err(LedgerError::CategoryInUse)
    }
}
