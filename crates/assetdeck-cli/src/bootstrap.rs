//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - `SQLite` key/value store (via assetdeck-db)
//! - Asset catalog (built-in sample or a JSON file)
//! - Settings and playground services (via assetdeck-core)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use assetdeck_core::paths::database_path;
use assetdeck_core::{
    AssetCatalog, KeyValueStore, PlaygroundState, SelectionStore, Settings, SettingsStore,
};
use assetdeck_db::StoreFactory;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path to the `SQLite` database file.
    pub database_path: PathBuf,
    /// Optional JSON catalog replacing the built-in sample.
    pub catalog_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create config with default paths.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            database_path: database_path()?,
            catalog_path: None,
        })
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog_path: Option<PathBuf>) -> Self {
        self.catalog_path = catalog_path;
        self
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Validated asset catalog.
    pub catalog: Arc<AssetCatalog>,
    /// Durable key/value store.
    pub store: Arc<dyn KeyValueStore>,
    /// Settings loaded at startup.
    pub settings: Settings,
    settings_store: SettingsStore,
    playground: PlaygroundState,
}

impl CliContext {
    pub const fn settings_store(&self) -> &SettingsStore {
        &self.settings_store
    }

    pub const fn playground(&self) -> &PlaygroundState {
        &self.playground
    }

    /// A fresh, empty selection bound to this context's catalog and store.
    pub fn selection_store(&self) -> SelectionStore {
        SelectionStore::new(Arc::clone(&self.catalog), Arc::clone(&self.store))
    }
}

/// Load the catalog named by `path`, or the built-in sample.
fn load_catalog(path: Option<&PathBuf>) -> Result<AssetCatalog> {
    let Some(path) = path else {
        return Ok(AssetCatalog::sample());
    };
    let json = std::fs::read_to_string(path)
        .map_err(CliError::from)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog = AssetCatalog::from_json(&json).map_err(CliError::from)?;
    debug!(
        path = %path.display(),
        models = catalog.models().len(),
        servers = catalog.mcp_servers().len(),
        "Loaded catalog"
    );
    Ok(catalog)
}

/// Bootstrap the CLI application.
///
/// Opens the database, loads the catalog and the stored settings.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let (_pool, store) = StoreFactory::open(&config.database_path)
        .await
        .with_context(|| {
            format!(
                "Failed to open database {}",
                config.database_path.display()
            )
        })?;

    let catalog = Arc::new(load_catalog(config.catalog_path.as_ref())?);
    let settings_store = SettingsStore::new(Arc::clone(&store));
    let settings = settings_store.load().await.map_err(CliError::from)?;

    Ok(CliContext {
        catalog,
        playground: PlaygroundState::new(Arc::clone(&store)),
        store,
        settings,
        settings_store,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &tempfile::TempDir) -> CliConfig {
        CliConfig {
            database_path: dir.path().join("data").join("assetdeck.db"),
            catalog_path: None,
        }
    }

    #[test]
    fn test_bootstrap_with_sample_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = tokio_test::block_on(bootstrap(config(&dir))).unwrap();
        assert_eq!(ctx.catalog.models().len(), AssetCatalog::sample().models().len());
        assert_eq!(ctx.settings, Settings::with_defaults());
    }

    #[test]
    fn test_bootstrap_with_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("catalog.json");
        std::fs::write(
            &catalog,
            r#"{"models": [{"id": "x", "name": "X", "slug": "x", "internalEndpoint": "http://x"}]}"#,
        )
        .unwrap();

        let ctx = tokio_test::block_on(bootstrap(config(&dir).with_catalog(Some(catalog)))).unwrap();
        assert_eq!(ctx.catalog.models().len(), 1);
        assert!(ctx.catalog.mcp_servers().is_empty());
    }

    #[test]
    fn test_bootstrap_rejects_invalid_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("catalog.json");
        std::fs::write(&catalog, "{not json").unwrap();

        let result = tokio_test::block_on(bootstrap(config(&dir).with_catalog(Some(catalog))));
        let err = result.err().unwrap();
        assert_eq!(err.downcast_ref::<CliError>().map(CliError::exit_code), Some(78));
    }
}
