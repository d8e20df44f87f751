//! Postgres-backed catalog store.
//!
//! Two tables, `categories` and `products`, with a foreign key
//! `products.category_id -> categories.id ON DELETE RESTRICT` (see
//! `migrations/0001_catalog.sql`). Money is stored as minor units in a
//! `BIGINT` column so no floating point touches the schema.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use stockroom_catalog::{Category, CategoryId, NewCategory, NewProduct, Product, ProductId};
use stockroom_core::{LedgerError, Money};

use crate::error::{StoreError, StoreResult};
use crate::store::CatalogStore;

/// [`CatalogStore`] over a SQLx connection pool.
///
/// The pool is thread-safe; each call is one round trip. Foreign-key
/// violations are translated into the domain taxonomy at the call site that
/// knows what they mean: `CategoryInUse` on a category delete, `NotFound` on
/// a product insert with a dangling category reference.
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect with a small pool sized for the single-request workload.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

fn map_sqlx(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => LedgerError::not_found().into(),
        sqlx::Error::Database(db) => StoreError::ConstraintViolation(db.message().to_string()),
        other => StoreError::unavailable(other.to_string()),
    }
}

fn category_from_row(row: &PgRow) -> StoreResult<Category> {
    Ok(Category {
        id: CategoryId::from(row.try_get::<i64, _>("id").map_err(map_sqlx)?),
        name: row.try_get("name").map_err(map_sqlx)?,
        description: row.try_get("description").map_err(map_sqlx)?,
        created_at: row.try_get("created_at").map_err(map_sqlx)?,
    })
}

fn product_from_row(row: &PgRow) -> StoreResult<Product> {
    let price_minor: i64 = row
        .try_get("unit_price_minor")
        .map_err(map_sqlx)?;
    let unit_price = u64::try_from(price_minor)
        .map(Money::from_minor)
        .map_err(|_| {
            StoreError::ConstraintViolation(format!("negative unit price: {price_minor}"))
        })?;

    Ok(Product {
        id: ProductId::from(row.try_get::<i64, _>("id").map_err(map_sqlx)?),
        name: row.try_get("name").map_err(map_sqlx)?,
        quantity: row.try_get("quantity").map_err(map_sqlx)?,
        unit_price,
        category_id: CategoryId::from(
            row.try_get::<i64, _>("category_id")
                .map_err(map_sqlx)?,
        ),
        updated_at: row.try_get("updated_at").map_err(map_sqlx)?,
    })
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, created_at
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.iter().map(category_from_row).collect()
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Category> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => category_from_row(&row),
            None => Err(LedgerError::not_found().into()),
        }
    }

    async fn insert_category(&self, new: NewCategory) -> StoreResult<Category> {
        let row = sqlx::query(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        category_from_row(&row)
    }

    async fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    // Defense in depth behind the pure deletion guard.
                    StoreError::from(LedgerError::CategoryInUse)
                } else {
                    map_sqlx(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::not_found().into());
        }
        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, quantity, unit_price_minor, category_id, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.iter().map(product_from_row).collect()
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Product> {
        let row = sqlx::query(
            r#"
            SELECT id, name, quantity, unit_price_minor, category_id, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => product_from_row(&row),
            None => Err(LedgerError::not_found().into()),
        }
    }

    async fn insert_product(&self, new: NewProduct) -> StoreResult<Product> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, quantity, unit_price_minor, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, quantity, unit_price_minor, category_id, updated_at
            "#,
        )
        .bind(&new.name)
        .bind(new.quantity)
        .bind(new.unit_price.minor() as i64)
        .bind(new.category_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                // Dangling category reference.
                StoreError::from(LedgerError::not_found())
            } else {
                map_sqlx(e)
            }
        })?;

        product_from_row(&row)
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::not_found().into());
        }
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    async fn adjust_stock(
        &self,
        id: ProductId,
        expected_quantity: i64,
        delta: i64,
    ) -> StoreResult<Product> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity + $3, updated_at = NOW()
            WHERE id = $1 AND quantity = $2 AND quantity + $3 >= 0
            RETURNING id, name, quantity, unit_price_minor, category_id, updated_at
            "#,
        )
        .bind(id.get())
        .bind(expected_quantity)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if let Some(row) = row {
            let product = product_from_row(&row)?;
            tracing::info!(
                product_id = %id,
                delta,
                new_quantity = product.quantity,
                "stock adjusted"
            );
            return Ok(product);
        }

        // The conditional update matched nothing; find out why.
        let current = self.get_product(id).await?;
        if current.quantity != expected_quantity {
            Err(LedgerError::conflict(format!(
                "quantity changed concurrently (expected {expected_quantity}, found {})",
                current.quantity
            ))
            .into())
        } else {
            Err(LedgerError::InsufficientStock {
                on_hand: expected_quantity,
                requested: delta.saturating_neg(),
            }
            .into())
        }
    }
}
