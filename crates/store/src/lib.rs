//! `stockroom-store` — catalog persistence.
//!
//! The durable side of the system: two tables (categories, products) behind
//! the [`CatalogStore`] trait. Ledger computations stay pure; every mutation
//! the ledger validates is persisted through this crate, and the stock
//! decrement is a single conditional update rather than a read-then-write
//! pair.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;
pub use store::{adjust_stock_retrying, CatalogStore};
