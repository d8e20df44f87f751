//! `stockroom-sales` — sale quotation.
//!
//! Computes invoice figures for selling a quantity of a product and produces
//! the validated stock-decrement request. Quoting never mutates anything; the
//! decrement only happens when the caller explicitly commits it against the
//! catalog store.

pub mod quote;

pub use quote::{quote_sale, SaleQuote, StockDecrement};
