pub mod connection;
pub mod memory;
pub mod migrations;
pub mod postgres;
pub mod repository;
pub mod store;

pub use connection::{get_db_pool, DatabaseConfig};
pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;
pub use repository::Repository;
pub use store::{DocumentStore, StoreError, StoreResult};

use anyhow::Result;
use std::sync::Arc;
use crate::utils::{Config, StoreBackend};

/// Build the store selected by `config`. The Postgres backend is migrated
/// before it is handed out.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = get_db_pool(&db_config).await?;
            migrations::run_migrations(&pool).await?;
            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; documents are lost on shutdown");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
