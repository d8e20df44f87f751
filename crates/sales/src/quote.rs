use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_catalog::{Product, ProductId};
use stockroom_core::{LedgerError, LedgerResult, Money};

/// Computed, not-yet-committed invoice figures for selling a product.
///
/// All money figures are rounded half-up at the cent; `gross` is the sum of
/// the rounded `net` and `tax` so the displayed lines always add up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleQuote {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub discount_pct: i64,
    pub tax_rate_pct: i64,
    /// Unit price after discount.
    pub unit_net: Money,
    pub net: Money,
    pub tax: Money,
    pub gross: Money,
    pub buyer: Option<String>,
    /// Quantity on hand when the quote was computed. The commit step uses it
    /// as the expected value of the conditional decrement, so a stale quote
    /// fails instead of double-decrementing.
    pub snapshot_quantity: i64,
    pub issued_at: DateTime<Utc>,
}

/// Validated stock-decrement request derived from a quote.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDecrement {
    pub product_id: ProductId,
    pub expected_quantity: i64,
    pub delta: i64,
}

impl SaleQuote {
    /// The conditional commit request for this quote.
    pub fn stock_decrement(&self) -> StockDecrement {
        StockDecrement {
            product_id: self.product_id,
            expected_quantity: self.snapshot_quantity,
            delta: -self.quantity,
        }
    }
}

/// Quote the sale of `quantity` units of `product`.
///
/// Figures: `unit_net = price × (1 − discount/100)`, `net = unit_net ×
/// quantity`, `tax = net × tax_rate/100`, `gross = net + tax`. Computed on
/// wide integers from the raw price so rounding happens once per figure.
///
/// Quoting has no side effect. Committing is the caller's explicit second
/// step: apply [`SaleQuote::stock_decrement`] through the catalog store.
pub fn quote_sale(
    product: &Product,
    quantity: i64,
    discount_pct: i64,
    tax_rate_pct: i64,
    buyer: Option<String>,
) -> LedgerResult<SaleQuote> {
    if quantity <= 0 {
        return Err(LedgerError::invalid_quantity(format!(
            "sale quantity must be positive (got {quantity})"
        )));
    }
    if !(0..=100).contains(&discount_pct) {
        return Err(LedgerError::invalid_discount(format!(
            "discount must be between 0 and 100 (got {discount_pct})"
        )));
    }
    if tax_rate_pct < 0 {
        return Err(LedgerError::invalid_tax_rate(format!(
            "tax rate cannot be negative (got {tax_rate_pct})"
        )));
    }
    if quantity > product.quantity {
        return Err(LedgerError::InsufficientStock {
            on_hand: product.quantity,
            requested: quantity,
        });
    }

    let price = product.unit_price.minor() as u128;
    let qty = quantity as u128;
    let complement = (100 - discount_pct) as u128;
    let tax_rate = tax_rate_pct as u128;

    let unit_net = to_money(div_round_half_up(price * complement, 100))?;
    let net = to_money(div_round_half_up(price * qty * complement, 100))?;
    let tax = to_money(div_round_half_up(price * qty * complement * tax_rate, 100 * 100))?;
    let gross = net
        .checked_add(tax)
        .ok_or_else(|| LedgerError::validation("sale total overflows"))?;

    Ok(SaleQuote {
        product_id: product.id,
        product_name: product.name.clone(),
        quantity,
        unit_price: product.unit_price,
        discount_pct,
        tax_rate_pct,
        unit_net,
        net,
        tax,
        gross,
        buyer,
        snapshot_quantity: product.quantity,
        issued_at: Utc::now(),
    })
}

fn div_round_half_up(numer: u128, denom: u128) -> u128 {
    (numer + denom / 2) / denom
}

fn to_money(minor: u128) -> LedgerResult<Money> {
    u64::try_from(minor)
        .map(Money::from_minor)
        .map_err(|_| LedgerError::validation("sale amount overflows"))
}
