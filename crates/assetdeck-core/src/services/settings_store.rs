//! Settings persistence on top of the key/value store.

use std::sync::Arc;

use super::playground_state::{keys, read_json, write_json};
use crate::ports::{CoreError, KeyValueStore, PersistenceError};
use crate::settings::{Settings, SettingsUpdate, validate_settings};

/// Loads and saves application `Settings` as one JSON value.
#[derive(Clone)]
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load settings. Returns defaults if none are stored.
    pub async fn load(&self) -> Result<Settings, PersistenceError> {
        let stored: Option<Settings> = read_json(self.store.as_ref(), keys::APP_SETTINGS).await?;
        Ok(stored.unwrap_or_else(Settings::with_defaults))
    }

    pub async fn save(&self, settings: &Settings) -> Result<(), PersistenceError> {
        write_json(self.store.as_ref(), keys::APP_SETTINGS, settings).await
    }

    /// Apply a partial update, validate the result and persist it.
    pub async fn update(&self, update: &SettingsUpdate) -> Result<Settings, CoreError> {
        let mut settings = self.load().await?;
        settings.merge(update);
        validate_settings(&settings)?;
        self.save(&settings).await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::InMemoryKeyValueStore;
    use crate::settings::SettingsError;

    #[tokio::test]
    async fn test_load_returns_defaults_when_empty() {
        let store = SettingsStore::new(Arc::new(InMemoryKeyValueStore::new()));
        assert_eq!(store.load().await.unwrap(), Settings::with_defaults());
    }

    #[tokio::test]
    async fn test_update_persists() {
        let store = SettingsStore::new(Arc::new(InMemoryKeyValueStore::new()));
        let update = SettingsUpdate {
            step_delay_ms: Some(Some(250)),
            ..Default::default()
        };
        store.update(&update).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.step_delay_ms, Some(250));
        assert_eq!(loaded.page_size, Settings::with_defaults().page_size);
    }

    #[tokio::test]
    async fn test_invalid_update_is_not_saved() {
        let store = SettingsStore::new(Arc::new(InMemoryKeyValueStore::new()));
        let update = SettingsUpdate {
            page_size: Some(Some(0)),
            ..Default::default()
        };
        let err = store.update(&update).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Settings(SettingsError::InvalidPageSize(0))
        ));
        assert_eq!(store.load().await.unwrap(), Settings::with_defaults());
    }
}
