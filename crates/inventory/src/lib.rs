//! `stockroom-inventory` — the inventory ledger.
//!
//! Pure, synchronous computations over catalog snapshots: stock adjustment,
//! low-stock evaluation, and valuation. No I/O; callers read records from the
//! catalog store, hand them in, and persist whatever comes back.

pub mod stock;
pub mod valuation;

pub use stock::{adjust, below_threshold};
pub use valuation::{report, total_value, value_by_category, ValuationReport, UNASSIGNED_CATEGORY};
