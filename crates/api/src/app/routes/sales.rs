use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};

use stockroom_catalog::ProductId;
use stockroom_sales::quote_sale;

use crate::app::{dto, errors};
use crate::context::AppContext;

pub fn router() -> Router {
    Router::new()
        .route("/quote", post(quote))
        .route("/confirm", post(confirm))
}

/// Compute invoice figures for a prospective sale. Mutates nothing: the
/// preview a user stares at never changes stock on its own.
pub async fn quote(
    Extension(ctx): Extension<AppContext>,
    Json(body): Json<dto::QuoteSaleRequest>,
) -> axum::response::Response {
    let product = match ctx.store().get_product(ProductId::from(body.product_id)).await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    match quote_sale(
        &product,
        body.quantity,
        body.discount_pct,
        body.tax_rate_pct,
        body.buyer,
    ) {
        Ok(quote) => (StatusCode::OK, Json(dto::quote_to_json(&quote))).into_response(),
        Err(e) => errors::ledger_error_to_response(&e),
    }
}

/// Commit a previously previewed sale.
///
/// Re-reads the product, re-validates the figures, then applies the
/// decrement conditionally on the client's `expected_quantity` snapshot. A
/// stale snapshot gets `409 conflict` and changes nothing — the client must
/// re-quote, never silently re-sell.
pub async fn confirm(
    Extension(ctx): Extension<AppContext>,
    Json(body): Json<dto::ConfirmSaleRequest>,
) -> axum::response::Response {
    let product_id = ProductId::from(body.product_id);
    let product = match ctx.store().get_product(product_id).await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let quote = match quote_sale(
        &product,
        body.quantity,
        body.discount_pct,
        body.tax_rate_pct,
        body.buyer,
    ) {
        Ok(q) => q,
        Err(e) => return errors::ledger_error_to_response(&e),
    };

    match ctx
        .store()
        .adjust_stock(product_id, body.expected_quantity, -body.quantity)
        .await
    {
        Ok(updated) => {
            tracing::info!(
                product_id = %product_id,
                quantity = body.quantity,
                gross_minor = quote.gross.minor(),
                "sale confirmed"
            );
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "invoice": dto::quote_to_json(&quote),
                    "product": dto::product_to_json(&updated),
                })),
            )
                .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
