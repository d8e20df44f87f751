use axum::Router;

pub mod categories;
pub mod inventory;
pub mod products;
pub mod sales;
pub mod system;

/// Router for all catalog endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/inventory", inventory::router())
        .nest("/sales", sales::router())
}
