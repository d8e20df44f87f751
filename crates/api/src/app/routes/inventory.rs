use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockroom_inventory::{below_threshold, report};

use crate::app::{dto, errors};
use crate::context::AppContext;

/// Reorder banner default, when the caller does not pass a threshold.
const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

pub fn router() -> Router {
    Router::new()
        .route("/low-stock", get(low_stock))
        .route("/valuation", get(valuation))
}

pub async fn low_stock(
    Extension(ctx): Extension<AppContext>,
    Query(params): Query<dto::LowStockParams>,
) -> axum::response::Response {
    let threshold = params.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

    let products = match ctx.store().list_products().await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let items: Vec<_> = below_threshold(&products, threshold)
        .iter()
        .map(dto::product_to_json)
        .collect();
    (
        StatusCode::OK,
        Json(serde_json::json!({ "threshold": threshold, "items": items })),
    )
        .into_response()
}

pub async fn valuation(Extension(ctx): Extension<AppContext>) -> axum::response::Response {
    let products = match ctx.store().list_products().await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };
    let categories = match ctx.store().list_categories().await {
        Ok(c) => c,
        Err(e) => return errors::store_error_to_response(e),
    };

    let report = report(&products, &categories);
    (StatusCode::OK, Json(dto::valuation_to_json(&report))).into_response()
}
