//! `stockroom-catalog` — Category and Product records.
//!
//! Plain in-memory records as the catalog store hands them out, plus the
//! validation applied before anything is written back.

pub mod category;
pub mod product;

pub use category::{can_delete_category, ensure_deletable, Category, CategoryId, NewCategory};
pub use product::{NewProduct, Product, ProductId};
