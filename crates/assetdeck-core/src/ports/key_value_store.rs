//! Durable key/value store port.
//!
//! Keys are plain strings and values are JSON-encoded strings. Concurrent
//! writers are not coordinated: the last write wins.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::PersistenceError;

/// String-keyed store for JSON-encoded values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Process-local store for tests and ephemeral sessions.
///
/// An optional quota caps the total size (keys plus values, in bytes),
/// mirroring browser storage limits.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once `quota_bytes` would be exceeded.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;

        if let Some(quota) = self.quota_bytes {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(PersistenceError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("nope").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = InMemoryKeyValueStore::new();
        store.set("k", "1").await.unwrap();
        store.set("k", "2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_quota_rejects_oversized_write() {
        let store = InMemoryKeyValueStore::with_quota(8);
        store.set("k", "1234").await.unwrap();
        let err = store.set("other", "1234").await.unwrap_err();
        assert_eq!(
            err,
            PersistenceError::QuotaExceeded {
                key: "other".into()
            }
        );
        // Replacing an existing key only counts the new value
        store.set("k", "123456").await.unwrap();
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
        store.set("userProfile", "\"AI Admin\"").await.unwrap();
        assert!(store.get("userProfile").await.unwrap().is_some());
    }
}
