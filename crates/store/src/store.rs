//! Catalog store abstraction.

use async_trait::async_trait;

use stockroom_catalog::{Category, CategoryId, NewCategory, NewProduct, Product, ProductId};
use stockroom_core::LedgerError;

use crate::error::{StoreError, StoreResult};

/// Durable home of Category and Product records.
///
/// One blocking round trip per call, no transactional grouping, last write
/// wins — except [`CatalogStore::adjust_stock`], which is conditional on the
/// caller's quantity snapshot so concurrent sales cannot double-decrement.
///
/// Implementations report domain outcomes through
/// [`StoreError::Domain`]: `NotFound` for unresolved ids, `CategoryInUse`
/// when a foreign key blocks a category delete, `Conflict` for a stale
/// snapshot on the conditional update.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn get_category(&self, id: CategoryId) -> StoreResult<Category>;

    /// Insert a draft; the store assigns the id.
    async fn insert_category(&self, new: NewCategory) -> StoreResult<Category>;

    /// Delete a category. Fails with `CategoryInUse` while products still
    /// reference it.
    async fn delete_category(&self, id: CategoryId) -> StoreResult<()>;

    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    async fn get_product(&self, id: ProductId) -> StoreResult<Product>;

    /// Insert a draft; the store assigns the id. A dangling category
    /// reference fails with `NotFound`.
    async fn insert_product(&self, new: NewProduct) -> StoreResult<Product>;

    async fn delete_product(&self, id: ProductId) -> StoreResult<()>;

    /// Apply a signed stock delta as a single conditional update.
    ///
    /// The write only lands when the stored quantity still equals
    /// `expected_quantity` and the result stays non-negative. On a stale
    /// snapshot the store reports `Conflict` and changes nothing; it never
    /// falls back to read-then-write.
    async fn adjust_stock(
        &self,
        id: ProductId,
        expected_quantity: i64,
        delta: i64,
    ) -> StoreResult<Product>;
}

/// Bounded-retry stock adjustment for restocks and manual corrections.
///
/// Re-reads, re-validates through the ledger, and re-attempts the
/// conditional update when another writer got in between. Sale confirmation
/// must NOT go through here — a sale commits against its quote's snapshot
/// exactly once, so a stale quote surfaces as `Conflict`.
pub async fn adjust_stock_retrying(
    store: &dyn CatalogStore,
    id: ProductId,
    delta: i64,
    max_attempts: u32,
) -> StoreResult<Product> {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let current = store.get_product(id).await?;
        stockroom_inventory::adjust(&current, delta)?;

        match store.adjust_stock(id, current.quantity, delta).await {
            Err(StoreError::Domain(LedgerError::Conflict(reason))) if attempt < max_attempts => {
                tracing::debug!(
                    product_id = %id,
                    attempt,
                    %reason,
                    "stock adjustment raced with another writer, retrying"
                );
            }
            other => return other,
        }
    }
}
