//! Inventory valuation: aggregate value and per-category breakdowns.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use stockroom_catalog::{Category, CategoryId, Product};
use stockroom_core::Money;

/// Display group for products whose category reference cannot be resolved.
pub const UNASSIGNED_CATEGORY: &str = "Unassigned";

/// Sum of line values over all products. Empty input values at zero.
pub fn total_value(products: &[Product]) -> Money {
    products.iter().map(Product::line_value).sum()
}

/// Line values grouped by resolved category name.
///
/// Grouping keys by the category's *identity* first; the name is only the
/// display label, so an unresolvable reference lands under
/// [`UNASSIGNED_CATEGORY`] rather than being dropped. Categories with no
/// products get no entry. `BTreeMap` keeps the output deterministic.
pub fn value_by_category(products: &[Product], categories: &[Category]) -> BTreeMap<String, Money> {
    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut groups: BTreeMap<String, Money> = BTreeMap::new();
    for product in products {
        let label = names
            .get(&product.category_id)
            .copied()
            .unwrap_or(UNASSIGNED_CATEGORY);
        let entry = groups.entry(label.to_string()).or_insert(Money::ZERO);
        *entry = entry.saturating_add(product.line_value());
    }
    groups
}

/// Dashboard summary: totals plus the per-category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuationReport {
    pub product_count: usize,
    pub total_quantity: i64,
    pub total_value: Money,
    pub by_category: BTreeMap<String, Money>,
}

pub fn report(products: &[Product], categories: &[Category]) -> ValuationReport {
    ValuationReport {
        product_count: products.len(),
        total_quantity: products.iter().map(|p| p.quantity).sum(),
        total_value: total_value(products),
        by_category: value_by_category(products, categories),
    }
}
