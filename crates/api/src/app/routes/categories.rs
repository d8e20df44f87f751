use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
    Json, Router,
};

use stockroom_catalog::{self as catalog, CategoryId, NewCategory};

use crate::app::{dto, errors};
use crate::context::AppContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_category).get(list_categories))
        .route("/:id", delete(delete_category))
}

pub async fn create_category(
    Extension(ctx): Extension<AppContext>,
    Json(body): Json<dto::CreateCategoryRequest>,
) -> axum::response::Response {
    let draft = NewCategory {
        name: body.name,
        description: body.description,
    };
    if let Err(e) = draft.validate() {
        return errors::ledger_error_to_response(&e);
    }

    match ctx.store().insert_category(draft).await {
        Ok(category) => {
            tracing::info!(category_id = %category.id, "category created");
            (StatusCode::CREATED, Json(dto::category_to_json(&category))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_categories(
    Extension(ctx): Extension<AppContext>,
) -> axum::response::Response {
    match ctx.store().list_categories().await {
        Ok(categories) => {
            let items: Vec<_> = categories.iter().map(dto::category_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_category(
    Extension(ctx): Extension<AppContext>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    let category_id = CategoryId::from(id);

    // Pure guard first so the common case never reaches the store's FK.
    let category = match ctx.store().get_category(category_id).await {
        Ok(c) => c,
        Err(e) => return errors::store_error_to_response(e),
    };
    let products = match ctx.store().list_products().await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };
    if let Err(e) = catalog::ensure_deletable(&category, &products) {
        return errors::ledger_error_to_response(&e);
    }

    match ctx.store().delete_category(category_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
