//! `SQLite` implementation of the `KeyValueStore` port.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use assetdeck_core::{KeyValueStore, PersistenceError};

/// `SQLITE_FULL`: the database or disk is full.
const SQLITE_FULL: &str = "13";

/// String key/value store backed by the `kv_store` table.
///
/// Values are opaque strings; callers store JSON.
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Every stored key, sorted.
    pub async fn keys(&self) -> Result<Vec<String>, PersistenceError> {
        let rows = sqlx::query("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "*"))?;
        Ok(rows.iter().map(|r| r.get("key")).collect())
    }
}

fn map_sqlx_error(err: sqlx::Error, key: &str) -> PersistenceError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(SQLITE_FULL) => {
            PersistenceError::QuotaExceeded {
                key: key.to_string(),
            }
        }
        _ => PersistenceError::Unavailable(err.to_string()),
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, key))?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let updated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        sqlx::query("INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(&updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, key))?;

        tracing::debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = SqliteKeyValueStore::new(setup_test_database().await.unwrap());
        assert_eq!(store.get("playgroundModels").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let store = SqliteKeyValueStore::new(setup_test_database().await.unwrap());
        store.set("userProfile", "\"AI Admin\"").await.unwrap();
        store.set("userProfile", "\"AI Engineer\"").await.unwrap();

        assert_eq!(
            store.get("userProfile").await.unwrap().as_deref(),
            Some("\"AI Engineer\"")
        );
        assert_eq!(store.keys().await.unwrap(), vec!["userProfile"]);
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() {
        let pool = setup_test_database().await.unwrap();
        let store = SqliteKeyValueStore::new(pool.clone());
        pool.close().await;

        let err = store.set("appSettings", "{}").await.unwrap_err();
        assert!(matches!(err, PersistenceError::Unavailable(_)));
    }
}
