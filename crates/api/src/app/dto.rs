use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use stockroom_catalog::{Category, Product};
use stockroom_core::Money;
use stockroom_inventory::ValuationReport;
use stockroom_sales::SaleQuote;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub quantity: i64,
    /// Unit price in minor currency units (e.g., cents).
    pub unit_price_minor: u64,
    pub category_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub delta: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListProductsParams {
    /// Case-insensitive name substring filter.
    pub search: Option<String>,
    pub category_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LowStockParams {
    pub threshold: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSaleRequest {
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub discount_pct: i64,
    pub tax_rate_pct: i64,
    pub buyer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmSaleRequest {
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub discount_pct: i64,
    pub tax_rate_pct: i64,
    pub buyer: Option<String>,
    /// Quantity on hand when the quote was shown. The decrement is
    /// conditional on it, so a stale preview cannot oversell.
    pub expected_quantity: i64,
}

// -------------------------
// Response mapping
// -------------------------

fn money_to_json(amount: Money) -> JsonValue {
    json!({
        "minor": amount.minor(),
        "display": amount.to_string(),
    })
}

pub fn category_to_json(category: &Category) -> JsonValue {
    json!({
        "id": category.id.get(),
        "name": category.name,
        "description": category.description,
        "created_at": category.created_at.to_rfc3339(),
    })
}

pub fn product_to_json(product: &Product) -> JsonValue {
    json!({
        "id": product.id.get(),
        "name": product.name,
        "quantity": product.quantity,
        "unit_price": money_to_json(product.unit_price),
        "line_value": money_to_json(product.line_value()),
        "category_id": product.category_id.get(),
        "updated_at": product.updated_at.to_rfc3339(),
    })
}

pub fn quote_to_json(quote: &SaleQuote) -> JsonValue {
    json!({
        "product_id": quote.product_id.get(),
        "product_name": quote.product_name,
        "quantity": quote.quantity,
        "unit_price": money_to_json(quote.unit_price),
        "discount_pct": quote.discount_pct,
        "tax_rate_pct": quote.tax_rate_pct,
        "unit_net": money_to_json(quote.unit_net),
        "net": money_to_json(quote.net),
        "tax": money_to_json(quote.tax),
        "gross": money_to_json(quote.gross),
        "buyer": quote.buyer,
        "expected_quantity": quote.snapshot_quantity,
        "issued_at": quote.issued_at.to_rfc3339(),
    })
}

pub fn valuation_to_json(report: &ValuationReport) -> JsonValue {
    json!({
        "product_count": report.product_count,
        "total_quantity": report.total_quantity,
        "total_value": money_to_json(report.total_value),
        "by_category": report
            .by_category
            .iter()
            .map(|(name, value)| (name.clone(), money_to_json(*value)))
            .collect::<serde_json::Map<String, JsonValue>>(),
    })
}
