use std::sync::Arc;

use stockroom_store::CatalogStore;

/// Process-wide application context handed to every handler.
///
/// The catalog store client is constructed once at startup and injected
/// here; handlers never reach for an implicit global connection.
#[derive(Clone)]
pub struct AppContext {
    store: Arc<dyn CatalogStore>,
}

impl AppContext {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }
}
