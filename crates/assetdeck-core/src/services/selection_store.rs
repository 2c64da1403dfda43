//! Working selection and its durable commit.
//!
//! The selection is session state held in memory. Committing resolves it
//! against the catalog; persisting writes the resolved assets into the
//! playground keys on a best-effort basis.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use super::playground_state::PlaygroundState;
use crate::domain::{
    Asset, AssetCatalog, AssetKey, SelectionResolutionError, SelectionSet, WorkflowKind,
};
use crate::ports::{KeyValueStore, PersistenceError};

/// What a `persist` call wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistOutcome {
    /// Assets newly recorded; already-present ones are not listed.
    pub added: Vec<AssetKey>,
    /// Store failures. Non-empty means some records may be missing.
    pub warnings: Vec<PersistenceError>,
}

/// Holds the assets chosen for provisioning.
pub struct SelectionStore {
    catalog: Arc<AssetCatalog>,
    selection: Mutex<SelectionSet>,
    playground: PlaygroundState,
}

impl SelectionStore {
    pub fn new(catalog: Arc<AssetCatalog>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog,
            selection: Mutex::new(SelectionSet::new()),
            playground: PlaygroundState::new(store),
        }
    }

    pub const fn catalog(&self) -> &Arc<AssetCatalog> {
        &self.catalog
    }

    pub const fn playground(&self) -> &PlaygroundState {
        &self.playground
    }

    fn selection(&self) -> MutexGuard<'_, SelectionSet> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flip membership of `key`. Returns the new membership.
    pub fn toggle(&self, key: AssetKey) -> bool {
        self.selection().toggle(key)
    }

    /// Replace the selection.
    pub fn select_all(&self, keys: impl IntoIterator<Item = AssetKey>) {
        self.selection().select_all(keys);
    }

    pub fn clear(&self) {
        self.selection().clear();
    }

    pub fn snapshot(&self) -> SelectionSet {
        self.selection().clone()
    }

    /// Resolve keys to catalog assets, in catalog order.
    pub fn resolve(&self, selection: &SelectionSet) -> (Vec<Asset>, Vec<SelectionResolutionError>) {
        let mut found = Vec::with_capacity(selection.len());
        let mut missing = Vec::new();

        for key in selection.iter() {
            match (self.catalog.position(key), self.catalog.find(key)) {
                (Some(position), Some(asset)) => found.push((position, asset)),
                _ => missing.push(SelectionResolutionError { key: key.clone() }),
            }
        }

        found.sort_by_key(|(position, _)| *position);
        (found.into_iter().map(|(_, asset)| asset).collect(), missing)
    }

    /// Resolve the current selection. Stale keys are dropped with a warning.
    pub fn commit(&self) -> Vec<Asset> {
        let selection = self.snapshot();
        let (assets, missing) = self.resolve(&selection);
        for err in &missing {
            warn!(key = %err.key, "{err}; dropping from selection");
        }
        assets
    }

    /// Record `assets` as provisioned by a run of `kind`.
    ///
    /// Never fails: store errors are logged and returned as warnings.
    pub async fn persist(&self, assets: &[Asset], kind: WorkflowKind) -> PersistOutcome {
        let mut outcome = PersistOutcome::default();

        match kind {
            WorkflowKind::ConfigurePlayground => {
                let mut records = Vec::new();
                let mut servers = Vec::new();
                for asset in assets {
                    match asset {
                        Asset::Model(_) => records.push(asset.provision_record()),
                        Asset::McpServer(server) => servers.push(server.name.clone()),
                    }
                }

                if !records.is_empty() {
                    match self.playground.append_playground_models(&records).await {
                        Ok(ids) => outcome.added.extend(ids.into_iter().map(AssetKey::model)),
                        Err(e) => outcome.warnings.push(e),
                    }
                }
                if !servers.is_empty() {
                    match self.playground.append_mcp_servers(&servers).await {
                        Ok(names) => outcome.added.extend(assets.iter().filter_map(|a| match a {
                            Asset::McpServer(s) if names.contains(&s.name) => Some(a.key()),
                            Asset::McpServer(_) | Asset::Model(_) => None,
                        })),
                        Err(e) => outcome.warnings.push(e),
                    }
                }
            }
            WorkflowKind::CreateEndpoint => {
                let mut ids = Vec::new();
                for asset in assets {
                    match asset {
                        Asset::Model(model) => ids.push(model.id.clone()),
                        Asset::McpServer(server) => {
                            debug!(server = %server.name, "MCP servers have no external endpoint; skipping");
                        }
                    }
                }
                if !ids.is_empty() {
                    match self.playground.append_models_with_endpoints(&ids).await {
                        Ok(added) => outcome.added.extend(added.into_iter().map(AssetKey::model)),
                        Err(e) => outcome.warnings.push(e),
                    }
                }
            }
        }

        for err in &outcome.warnings {
            warn!(%kind, "Failed to persist provisioning state: {err}");
        }
        outcome
    }
}
