//! Stock adjustment and low-stock evaluation.

use stockroom_catalog::Product;
use stockroom_core::{LedgerError, LedgerResult};

/// Compute the quantity on hand after applying a signed delta.
///
/// Positive deltas are restocks, negative deltas are sales. Pure: the caller
/// is responsible for persisting the new quantity, and must not write back
/// when this returns an error.
pub fn adjust(product: &Product, delta: i64) -> LedgerResult<i64> {
    let new_quantity = product
        .quantity
        .checked_add(delta)
        .ok_or_else(|| LedgerError::invalid_quantity("stock adjustment overflows"))?;

    if new_quantity < 0 {
        return Err(LedgerError::InsufficientStock {
            on_hand: product.quantity,
            requested: delta.saturating_neg(),
        });
    }

    Ok(new_quantity)
}

/// Products at or below `threshold`, flagged for reorder.
///
/// The comparison is inclusive. Output order is ascending quantity with ties
/// broken by ascending name, so the result is deterministic.
pub fn below_threshold(products: &[Product], threshold: u32) -> Vec<Product> {
    let mut low: Vec<Product> = products
        .iter()
        .filter(|p| p.quantity <= i64::from(threshold))
        .cloned()
        .collect();
    low.sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.name.cmp(&b.name)));
    low
}
