//! Composition utilities for wiring the `SQLite` store into core services.

use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;

use assetdeck_core::KeyValueStore;

use crate::repositories::SqliteKeyValueStore;
use crate::setup::setup_database;

/// Construction helpers only; no domain logic.
pub struct StoreFactory;

impl StoreFactory {
    /// Wrap a pool as the core `KeyValueStore` port.
    pub fn build_store(pool: SqlitePool) -> Arc<dyn KeyValueStore> {
        Arc::new(SqliteKeyValueStore::new(pool))
    }

    /// Open the database at `db_path` and return the pool and its store.
    pub async fn open(db_path: &Path) -> anyhow::Result<(SqlitePool, Arc<dyn KeyValueStore>)> {
        let pool = setup_database(db_path).await?;
        let store = Self::build_store(pool.clone());
        Ok((pool, store))
    }
}
