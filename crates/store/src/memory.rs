//! In-memory catalog store for tests and the dev fallback.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use stockroom_catalog::{Category, CategoryId, NewCategory, NewProduct, Product, ProductId};
use stockroom_core::LedgerError;

use crate::error::{StoreError, StoreResult};
use crate::store::CatalogStore;

#[derive(Debug, Default)]
struct Inner {
    categories: HashMap<i64, Category>,
    products: HashMap<i64, Product>,
    next_category_id: i64,
    next_product_id: i64,
}

/// Volatile [`CatalogStore`] with the same observable contract as the
/// Postgres implementation: store-assigned ids, foreign-key behavior on
/// category deletes and product inserts, and the conditional stock update.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Inner>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::unavailable("store lock poisoned")
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        let mut categories: Vec<Category> = inner.categories.values().cloned().collect();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Category> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        inner
            .categories
            .get(&id.get())
            .cloned()
            .ok_or_else(|| LedgerError::not_found().into())
    }

    async fn insert_category(&self, new: NewCategory) -> StoreResult<Category> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        inner.next_category_id += 1;
        let category = Category {
            id: CategoryId::from(inner.next_category_id),
            name: new.name,
            description: new.description,
            created_at: Utc::now(),
        };
        inner.categories.insert(category.id.get(), category.clone());
        Ok(category)
    }

    async fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        if !inner.categories.contains_key(&id.get()) {
            return Err(LedgerError::not_found().into());
        }
        // Same behavior as the FK with ON DELETE RESTRICT.
        if inner.products.values().any(|p| p.category_id == id) {
            return Err(LedgerError::CategoryInUse.into());
        }
        inner.categories.remove(&id.get());
        Ok(())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        let mut products: Vec<Product> = inner.products.values().cloned().collect();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Product> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        inner
            .products
            .get(&id.get())
            .cloned()
            .ok_or_else(|| LedgerError::not_found().into())
    }

    async fn insert_product(&self, new: NewProduct) -> StoreResult<Product> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        if !inner.categories.contains_key(&new.category_id.get()) {
            return Err(LedgerError::not_found().into());
        }
        inner.next_product_id += 1;
        let product = Product {
            id: ProductId::from(inner.next_product_id),
            name: new.name,
            quantity: new.quantity,
            unit_price: new.unit_price,
            category_id: new.category_id,
            updated_at: Utc::now(),
        };
        inner.products.insert(product.id.get(), product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        match inner.products.remove(&id.get()) {
            Some(_) => Ok(()),
            None => Err(LedgerError::not_found().into()),
        }
    }

    async fn adjust_stock(
        &self,
        id: ProductId,
        expected_quantity: i64,
        delta: i64,
    ) -> StoreResult<Product> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        let product = inner
            .products
            .get_mut(&id.get())
            .ok_or_else(LedgerError::not_found)?;

        if product.quantity != expected_quantity {
            return Err(LedgerError::conflict(format!(
                "quantity changed concurrently (expected {expected_quantity}, found {})",
                product.quantity
            ))
            .into());
        }

        let new_quantity = expected_quantity + delta;
        if new_quantity < 0 {
            return Err(LedgerError::InsufficientStock {
                on_hand: expected_quantity,
                requested: delta.saturating_neg(),
            }
            .into());
        }

        product.quantity = new_quantity;
        product.updated_at = Utc::now();
        tracing::debug!(product_id = %id, delta, new_quantity, "stock adjusted");
        Ok(product.clone())
    }
}
