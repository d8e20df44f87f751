use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::LedgerError;
use stockroom_store::StoreError;

/// Map a ledger error to a consistent JSON response.
///
/// Validation kinds are the caller's fault (400); `InsufficientStock` is a
/// well-formed request the ledger refuses (422); in-use and stale-snapshot
/// outcomes are conflicts (409).
pub fn ledger_error_to_response(err: &LedgerError) -> axum::response::Response {
    match err {
        LedgerError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg.clone())
        }
        LedgerError::InvalidId(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg.clone())
        }
        LedgerError::InvalidQuantity(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_quantity", msg.clone())
        }
        LedgerError::InvalidDiscount(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_discount", msg.clone())
        }
        LedgerError::InvalidTaxRate(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_tax_rate", msg.clone())
        }
        LedgerError::InsufficientStock { .. } => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "insufficient_stock",
            err.to_string(),
        ),
        LedgerError::CategoryInUse => json_error(
            StatusCode::CONFLICT,
            "category_in_use",
            "category still has dependent products",
        ),
        LedgerError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        LedgerError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg.clone()),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(e) => ledger_error_to_response(&e),
        StoreError::Unavailable(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
        StoreError::ConstraintViolation(msg) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "constraint_violation",
            msg,
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
