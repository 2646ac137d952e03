//! Store selection and access-layer wiring.

use std::sync::Arc;

use catalog_infra::{InMemoryProductStore, PostgresProductStore, StoreError};
use catalog_products::{CatalogService, ProductStore};

use crate::config::ApiConfig;

/// Build the catalog over Postgres when `DATABASE_URL` is configured,
/// otherwise over the in-memory store.
pub async fn build_catalog(config: &ApiConfig) -> Result<CatalogService, StoreError> {
    let store: Arc<dyn ProductStore> = match &config.database_url {
        Some(url) => {
            let store = PostgresProductStore::connect(url, config.database_max_connections).await?;
            store.ensure_schema().await?;
            tracing::info!("using postgres product store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; products are kept in memory only");
            Arc::new(InMemoryProductStore::new())
        }
    };

    Ok(CatalogService::new(store))
}

/// In-memory catalog (tests/dev).
pub fn in_memory_catalog() -> CatalogService {
    CatalogService::new(Arc::new(InMemoryProductStore::new()))
}
