//! Document store selection

use std::sync::Arc;

use hm_core::repositories::{DocumentStore, InMemoryDocumentStore};
use hm_shared::config::{AppConfig, StoreBackend};

use crate::InfrastructureError;

/// Build the document store named by `config.store.backend`
///
/// For MySQL this opens the pool and makes sure the documents table exists.
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>, InfrastructureError> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory document store, data is lost on restart");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
        StoreBackend::MySql => build_mysql_store(config).await,
    }
}

#[cfg(feature = "mysql")]
async fn build_mysql_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>, InfrastructureError> {
    use crate::database::{DatabasePool, MySqlDocumentStore};

    let pool = DatabasePool::new(config.database.clone()).await?;
    let store = MySqlDocumentStore::new(
        pool.get_pool().clone(),
        config.database.documents_table.clone(),
    )?;
    store.ensure_schema().await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "mysql"))]
async fn build_mysql_store(_config: &AppConfig) -> Result<Arc<dyn DocumentStore>, InfrastructureError> {
    Err(InfrastructureError::Config(
        "MySQL store requested but the `mysql` feature is disabled".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend() {
        let store = build_store(&AppConfig::development()).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }
}
