//! Typed access to the persisted playground keys.
//!
//! Every value is JSON under a fixed key. Appends never overwrite an entry
//! that is already present, and a value that fails to decode is reported
//! rather than replaced.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{PersistedProvisionRecord, PlaygroundSnapshot, UserProfile};
use crate::ports::{KeyValueStore, PersistenceError};

/// Durable key names.
pub mod keys {
    /// `[{id, name, slug, endpoint, token}]` of provisioned models.
    pub const PLAYGROUND_MODELS: &str = "playgroundModels";
    /// `[id]` of models with an external endpoint.
    pub const MODELS_WITH_ENDPOINTS: &str = "modelsWithEndpoints";
    /// `[name]` of MCP servers enabled in the playground.
    pub const PLAYGROUND_MCP_SERVERS: &str = "playgroundMcpServers";
    /// `{server name: [tool name]}` of tools hidden from the playground.
    pub const EXCLUDED_TOOLS: &str = "excludedToolsData";
    /// `"AI Admin"` or `"AI Engineer"`.
    pub const USER_PROFILE: &str = "userProfile";
    /// Application settings blob.
    pub const APP_SETTINGS: &str = "appSettings";
}

/// Read and decode a JSON value, falling back to `T::default()` when absent.
pub(crate) async fn read_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, PersistenceError>
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| PersistenceError::Serialization(format!("{key}: {e}"))),
        None => Ok(T::default()),
    }
}

pub(crate) async fn write_json<T>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)
        .map_err(|e| PersistenceError::Serialization(format!("{key}: {e}")))?;
    store.set(key, &raw).await
}

/// Append string entries not already present; returns the ones added.
async fn append_unique(
    store: &dyn KeyValueStore,
    key: &str,
    entries: &[String],
) -> Result<Vec<String>, PersistenceError> {
    let mut current: Vec<String> = read_json(store, key).await?;
    let mut added = Vec::new();
    for entry in entries {
        if !current.contains(entry) {
            current.push(entry.clone());
            added.push(entry.clone());
        }
    }
    if !added.is_empty() {
        write_json(store, key, &current).await?;
    }
    Ok(added)
}

/// Typed facade over the playground keys of a `KeyValueStore`.
#[derive(Clone)]
pub struct PlaygroundState {
    store: Arc<dyn KeyValueStore>,
}

impl PlaygroundState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn playground_models(&self) -> Result<Vec<PersistedProvisionRecord>, PersistenceError> {
        read_json(self.store.as_ref(), keys::PLAYGROUND_MODELS).await
    }

    /// Append records whose id is not yet present. Returns the ids added.
    pub async fn append_playground_models(
        &self,
        records: &[PersistedProvisionRecord],
    ) -> Result<Vec<String>, PersistenceError> {
        let mut current = self.playground_models().await?;
        let mut added = Vec::new();
        for record in records {
            if !current.iter().any(|r| r.id == record.id) {
                current.push(record.clone());
                added.push(record.id.clone());
            }
        }
        if !added.is_empty() {
            write_json(self.store.as_ref(), keys::PLAYGROUND_MODELS, &current).await?;
        }
        Ok(added)
    }

    pub async fn models_with_endpoints(&self) -> Result<Vec<String>, PersistenceError> {
        read_json(self.store.as_ref(), keys::MODELS_WITH_ENDPOINTS).await
    }

    /// Record that external endpoints exist for `ids`. Returns the ids added.
    pub async fn append_models_with_endpoints(
        &self,
        ids: &[String],
    ) -> Result<Vec<String>, PersistenceError> {
        append_unique(self.store.as_ref(), keys::MODELS_WITH_ENDPOINTS, ids).await
    }

    pub async fn playground_mcp_servers(&self) -> Result<Vec<String>, PersistenceError> {
        read_json(self.store.as_ref(), keys::PLAYGROUND_MCP_SERVERS).await
    }

    /// Enable MCP servers by name. Returns the names added.
    pub async fn append_mcp_servers(&self, names: &[String]) -> Result<Vec<String>, PersistenceError> {
        append_unique(self.store.as_ref(), keys::PLAYGROUND_MCP_SERVERS, names).await
    }

    /// Disable an MCP server. Returns false if it was not enabled.
    pub async fn remove_mcp_server(&self, name: &str) -> Result<bool, PersistenceError> {
        let mut current = self.playground_mcp_servers().await?;
        let before = current.len();
        current.retain(|n| n != name);
        if current.len() == before {
            return Ok(false);
        }
        write_json(self.store.as_ref(), keys::PLAYGROUND_MCP_SERVERS, &current).await?;
        Ok(true)
    }

    pub async fn excluded_tools(&self) -> Result<BTreeMap<String, Vec<String>>, PersistenceError> {
        read_json(self.store.as_ref(), keys::EXCLUDED_TOOLS).await
    }

    /// Exclude or re-include one tool of a server. Returns true if anything changed.
    pub async fn set_tool_excluded(
        &self,
        server: &str,
        tool: &str,
        excluded: bool,
    ) -> Result<bool, PersistenceError> {
        let mut data = self.excluded_tools().await?;
        let tools = data.entry(server.to_string()).or_default();
        let present = tools.iter().any(|t| t == tool);

        let changed = match (excluded, present) {
            (true, false) => {
                tools.push(tool.to_string());
                true
            }
            (false, true) => {
                tools.retain(|t| t != tool);
                true
            }
            _ => false,
        };
        if !changed {
            return Ok(false);
        }
        if data.get(server).is_some_and(Vec::is_empty) {
            data.remove(server);
        }
        write_json(self.store.as_ref(), keys::EXCLUDED_TOOLS, &data).await?;
        Ok(true)
    }

    pub async fn user_profile(&self) -> Result<UserProfile, PersistenceError> {
        read_json(self.store.as_ref(), keys::USER_PROFILE).await
    }

    pub async fn set_user_profile(&self, profile: UserProfile) -> Result<(), PersistenceError> {
        write_json(self.store.as_ref(), keys::USER_PROFILE, &profile).await
    }

    /// Read every playground key.
    pub async fn snapshot(&self) -> Result<PlaygroundSnapshot, PersistenceError> {
        Ok(PlaygroundSnapshot {
            playground_models: self.playground_models().await?,
            models_with_endpoints: self.models_with_endpoints().await?,
            playground_mcp_servers: self.playground_mcp_servers().await?,
            excluded_tools: self.excluded_tools().await?,
            user_profile: self.user_profile().await?,
        })
    }
}
