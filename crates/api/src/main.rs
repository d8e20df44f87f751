use std::sync::Arc;

use stockroom_store::{CatalogStore, InMemoryCatalogStore, PostgresCatalogStore};

#[tokio::main]
async fn main() {
    stockroom_observability::init();

    let store: Arc<dyn CatalogStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let store = PostgresCatalogStore::connect(&url)
                .await
                .expect("failed to connect to DATABASE_URL");
            Arc::new(store)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using volatile in-memory store");
            Arc::new(InMemoryCatalogStore::new())
        }
    };

    let app = stockroom_api::app::build_app(store);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
