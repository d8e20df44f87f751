use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use stockroom_catalog::{CategoryId, NewProduct, Product, ProductId};
use stockroom_core::Money;
use stockroom_store::adjust_stock_retrying;

use crate::app::{dto, errors};
use crate::context::AppContext;

/// Attempts for restock/correction adjustments that race another writer.
const ADJUST_MAX_ATTEMPTS: u32 = 3;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", get(get_product).delete(delete_product))
        .route("/:id/adjust", post(adjust_stock))
}

pub async fn create_product(
    Extension(ctx): Extension<AppContext>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let draft = NewProduct {
        name: body.name,
        quantity: body.quantity,
        unit_price: Money::from_minor(body.unit_price_minor),
        category_id: CategoryId::from(body.category_id),
    };
    if let Err(e) = draft.validate() {
        return errors::ledger_error_to_response(&e);
    }

    match ctx.store().insert_product(draft).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "product created");
            (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(ctx): Extension<AppContext>,
    Query(params): Query<dto::ListProductsParams>,
) -> axum::response::Response {
    let products = match ctx.store().list_products().await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let needle = params.search.as_deref().map(str::to_lowercase);
    let category_id = params.category_id.map(CategoryId::from);

    let matches = |p: &Product| {
        needle
            .as_deref()
            .is_none_or(|n| p.name.to_lowercase().contains(n))
            && category_id.is_none_or(|c| p.category_id == c)
    };

    let items: Vec<_> = products
        .iter()
        .filter(|p| matches(p))
        .map(dto::product_to_json)
        .collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_product(
    Extension(ctx): Extension<AppContext>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match ctx.store().get_product(ProductId::from(id)).await {
        Ok(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(ctx): Extension<AppContext>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match ctx.store().delete_product(ProductId::from(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Restock or manual correction. Retries boundedly on a concurrent writer;
/// sale confirmation does not go through here (see `routes::sales`).
pub async fn adjust_stock(
    Extension(ctx): Extension<AppContext>,
    Path(id): Path<i64>,
    Json(body): Json<dto::AdjustStockRequest>,
) -> axum::response::Response {
    match adjust_stock_retrying(
        ctx.store(),
        ProductId::from(id),
        body.delta,
        ADJUST_MAX_ATTEMPTS,
    )
    .await
    {
        Ok(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
