//! In-memory asset catalog and catalog query types.
//!
//! The catalog is the source of truth for asset identity: selections are
//! resolved against it and stale keys are dropped.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::asset::{
    Asset, AssetDetails, AssetKey, AssetKind, McpServerAsset, ModelAsset, RegistrationState,
    is_valid_slug,
};

/// Errors raised while building or addressing the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Duplicate {kind:?} id in catalog: {id}")]
    DuplicateId { kind: AssetKind, id: String },

    #[error("Slug is not URL-safe for {key}: {slug:?}")]
    InvalidSlug { key: AssetKey, slug: String },

    #[error("Invalid asset key {0:?} (expected model:<id> or mcp:<id>)")]
    InvalidKey(String),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),
}

/// Wire form of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CatalogFile {
    models: Vec<ModelAsset>,
    mcp_servers: Vec<McpServerAsset>,
}

/// Validated collection of models and MCP servers.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    models: Vec<ModelAsset>,
    mcp_servers: Vec<McpServerAsset>,
}

impl AssetCatalog {
    /// Build a catalog, rejecting duplicate ids within a variant and
    /// slugs that are not URL-safe.
    pub fn new(
        models: Vec<ModelAsset>,
        mcp_servers: Vec<McpServerAsset>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (key, slug) in models
            .iter()
            .map(|m| (AssetKey::model(&m.id), &m.slug))
            .chain(
                mcp_servers
                    .iter()
                    .map(|s| (AssetKey::mcp_server(&s.id), &s.slug)),
            )
        {
            if !is_valid_slug(slug) {
                return Err(CatalogError::InvalidSlug {
                    key,
                    slug: slug.clone(),
                });
            }
            if !seen.insert(key.clone()) {
                return Err(CatalogError::DuplicateId {
                    kind: key.kind,
                    id: key.id,
                });
            }
        }

        Ok(Self {
            models,
            mcp_servers,
        })
    }

    /// Parse a catalog from JSON (`{"models": [...], "mcpServers": [...]}`).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(file.models, file.mcp_servers)
    }

    pub fn models(&self) -> &[ModelAsset] {
        &self.models
    }

    pub fn mcp_servers(&self) -> &[McpServerAsset] {
        &self.mcp_servers
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.mcp_servers.is_empty()
    }

    /// Every asset, models first, in catalog order.
    pub fn assets(&self) -> Vec<Asset> {
        self.models
            .iter()
            .cloned()
            .map(Asset::Model)
            .chain(self.mcp_servers.iter().cloned().map(Asset::McpServer))
            .collect()
    }

    /// Look up a single asset.
    pub fn find(&self, key: &AssetKey) -> Option<Asset> {
        match key.kind {
            AssetKind::Model => self
                .models
                .iter()
                .find(|m| m.id == key.id)
                .cloned()
                .map(Asset::Model),
            AssetKind::McpServer => self
                .mcp_servers
                .iter()
                .find(|s| s.id == key.id)
                .cloned()
                .map(Asset::McpServer),
        }
    }

    /// Position of an asset in catalog order, used to order resolved selections.
    pub(crate) fn position(&self, key: &AssetKey) -> Option<usize> {
        match key.kind {
            AssetKind::Model => self.models.iter().position(|m| m.id == key.id),
            AssetKind::McpServer => self
                .mcp_servers
                .iter()
                .position(|s| s.id == key.id)
                .map(|p| p + self.models.len()),
        }
    }

    /// The built-in demo catalog.
    #[allow(clippy::too_many_lines)]
    pub fn sample() -> Self {
        let details = |description: &str, keywords: &[&str], use_case: &str, status: &str, version: &str| {
            AssetDetails {
                description: description.to_string(),
                keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                use_case: use_case.to_string(),
                status: status.to_string(),
                version: version.to_string(),
            }
        };

        let models = vec![
            ModelAsset {
                id: "granite-3-1-8b".into(),
                name: "granite-3.1-8b-instruct".into(),
                slug: "granite-3-1-8b-instruct".into(),
                internal_endpoint: "http://granite-3-1-8b.genai.svc.cluster.local:8080/v1".into(),
                internal_token: Some("sk-internal-granite".into()),
                external_endpoint: Some("https://granite-3-1-8b.apps.example.com/v1".into()),
                external_token: Some("sk-external-granite".into()),
                registration_state: RegistrationState::Registered,
                details: details(
                    "General purpose instruction tuned model for enterprise chat",
                    &["chat", "instruct", "rag"],
                    "Chat",
                    "Running",
                    "3.1.0",
                ),
            },
            ModelAsset {
                id: "llama-3-1-8b".into(),
                name: "llama-3.1-8b-instruct".into(),
                slug: "llama-3-1-8b-instruct".into(),
                internal_endpoint: "http://llama-3-1-8b.genai.svc.cluster.local:8080/v1".into(),
                internal_token: Some("sk-internal-llama".into()),
                external_endpoint: None,
                external_token: None,
                registration_state: RegistrationState::Registered,
                details: details(
                    "Multilingual dialogue model with tool calling support",
                    &["chat", "tools", "multilingual"],
                    "Agents",
                    "Running",
                    "3.1.2",
                ),
            },
            ModelAsset {
                id: "mistral-7b".into(),
                name: "mistral-7b-instruct".into(),
                slug: "mistral-7b-instruct".into(),
                internal_endpoint: "http://mistral-7b.genai.svc.cluster.local:8080/v1".into(),
                internal_token: None,
                external_endpoint: None,
                external_token: None,
                registration_state: RegistrationState::NotRegistered,
                details: details(
                    "Compact instruction model for summarization",
                    &["summarization", "instruct"],
                    "Summarization",
                    "Stopped",
                    "0.3",
                ),
            },
            ModelAsset {
                id: "qwen-2-5-coder-7b".into(),
                name: "qwen2.5-coder-7b".into(),
                slug: "qwen2-5-coder-7b".into(),
                internal_endpoint: "http://qwen-coder.genai.svc.cluster.local:8080/v1".into(),
                internal_token: Some("sk-internal-qwen".into()),
                external_endpoint: None,
                external_token: None,
                registration_state: RegistrationState::Registered,
                details: details(
                    "Code generation and repair model",
                    &["code", "completion"],
                    "Code assistant",
                    "Running",
                    "2.5.10",
                ),
            },
        ];

        let mcp_servers = vec![
            McpServerAsset {
                id: "github".into(),
                name: "GitHub".into(),
                slug: "github".into(),
                streamable_endpoint: Some("http://mcp-github.genai.svc.cluster.local/mcp".into()),
                streamable_token: Some("mcp-github-token".into()),
                tools: vec![
                    "search_repositories".into(),
                    "create_issue".into(),
                    "get_pull_request".into(),
                ],
                details: details(
                    "Repository search, issues and pull requests",
                    &["git", "issues", "code"],
                    "Developer tools",
                    "Running",
                    "1.4.0",
                ),
            },
            McpServerAsset {
                id: "slack".into(),
                name: "Slack".into(),
                slug: "slack".into(),
                streamable_endpoint: Some("http://mcp-slack.genai.svc.cluster.local/mcp".into()),
                streamable_token: None,
                tools: vec!["post_message".into(), "list_channels".into()],
                details: details(
                    "Post and read channel messages",
                    &["chat", "notifications"],
                    "Collaboration",
                    "Running",
                    "0.9.1",
                ),
            },
            McpServerAsset {
                id: "kubernetes".into(),
                name: "Kubernetes".into(),
                slug: "kubernetes".into(),
                streamable_endpoint: None,
                streamable_token: None,
                tools: vec![
                    "list_pods".into(),
                    "get_logs".into(),
                    "scale_deployment".into(),
                ],
                details: details(
                    "Inspect and operate cluster workloads",
                    &["cluster", "ops"],
                    "Operations",
                    "Stopped",
                    "1.10.0",
                ),
            },
        ];

        Self {
            models,
            mcp_servers,
        }
    }
}

/// Attribute a filter value applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterAttribute {
    Name,
    Keyword,
    UseCase,
    Description,
}

impl FromStr for FilterAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "keyword" => Ok(Self::Keyword),
            "useCase" | "use-case" | "use_case" => Ok(Self::UseCase),
            "description" => Ok(Self::Description),
            other => Err(format!(
                "unknown filter attribute '{other}' (expected name, keyword, useCase, description)"
            )),
        }
    }
}

/// Mapping from attribute to the accepted substrings for that attribute.
///
/// Values are matched OR within an attribute and AND across attributes that
/// have at least one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: BTreeMap<FilterAttribute, BTreeSet<String>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter value. Returns false if it was already present.
    pub fn insert(&mut self, attribute: FilterAttribute, value: impl Into<String>) -> bool {
        self.values.entry(attribute).or_default().insert(value.into())
    }

    /// Remove a filter value. Returns true if it was present.
    pub fn remove(&mut self, attribute: FilterAttribute, value: &str) -> bool {
        let Some(set) = self.values.get_mut(&attribute) else {
            return false;
        };
        let removed = set.remove(value);
        if set.is_empty() {
            self.values.remove(&attribute);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True when at least one attribute has a registered value.
    pub fn is_active(&self) -> bool {
        self.values.values().any(|set| !set.is_empty())
    }

    /// Attributes with at least one value, and their values.
    pub fn active(&self) -> impl Iterator<Item = (FilterAttribute, &BTreeSet<String>)> {
        self.values
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(attr, set)| (*attr, set))
    }
}

/// Single sort key for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Status,
    Version,
    Description,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "status" => Ok(Self::Status),
            "version" => Ok(Self::Version),
            "description" => Ok(Self::Description),
            other => Err(format!(
                "unknown sort key '{other}' (expected name, status, version, description)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One page of a projected listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    /// Number of items before pagination.
    pub total_items: usize,
}

impl<T> Page<T> {
    pub const fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total_items.div_ceil(self.page_size)
    }
}

/// Why a projected listing is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyState {
    /// Nothing to show and no filter is active.
    NoAssets,
    /// Filters are active and nothing matches them.
    NoMatches,
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAssets => write!(f, "No assets available"),
            Self::NoMatches => write!(f, "No results match the current filters"),
        }
    }
}

/// Result of projecting a collection through a `CatalogQuery`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView<T> {
    pub page: Page<T>,
    pub empty_state: Option<EmptyState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_is_valid() {
        let sample = AssetCatalog::sample();
        let rebuilt = AssetCatalog::new(sample.models.clone(), sample.mcp_servers.clone());
        assert!(rebuilt.is_ok());
        assert!(!sample.is_empty());
    }

    #[test]
    fn test_duplicate_ids_within_variant_are_rejected() {
        let sample = AssetCatalog::sample();
        let mut models = sample.models.clone();
        models.push(models[0].clone());
        let err = AssetCatalog::new(models, vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { kind: AssetKind::Model, .. }));
    }

    #[test]
    fn test_same_id_across_variants_is_allowed() {
        let sample = AssetCatalog::sample();
        let mut model = sample.models[0].clone();
        model.id = "github".into();
        let catalog = AssetCatalog::new(vec![model], sample.mcp_servers.clone()).unwrap();
        assert!(catalog.find(&AssetKey::model("github")).is_some());
        assert!(catalog.find(&AssetKey::mcp_server("github")).is_some());
    }

    #[test]
    fn test_invalid_slug_is_rejected() {
        let sample = AssetCatalog::sample();
        let mut model = sample.models[0].clone();
        model.slug = "Not Safe".into();
        assert!(matches!(
            AssetCatalog::new(vec![model], vec![]),
            Err(CatalogError::InvalidSlug { .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "models": [{"id": "a", "name": "A", "slug": "a", "internalEndpoint": "http://a"}],
            "mcpServers": [{"id": "s", "name": "S", "slug": "s", "tools": ["t1"]}]
        }"#;
        let catalog = AssetCatalog::from_json(json).unwrap();
        assert_eq!(catalog.models().len(), 1);
        assert_eq!(catalog.mcp_servers()[0].tools, vec!["t1".to_string()]);
        assert!(matches!(
            AssetCatalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_position_orders_models_before_servers() {
        let catalog = AssetCatalog::sample();
        let first_server = catalog.position(&AssetKey::mcp_server("github")).unwrap();
        assert_eq!(first_server, catalog.models().len());
        assert_eq!(catalog.position(&AssetKey::model("nope")), None);
    }

    #[test]
    fn test_filter_set_tracks_activity() {
        let mut filters = FilterSet::new();
        assert!(!filters.is_active());
        assert!(filters.insert(FilterAttribute::Name, "llama"));
        assert!(!filters.insert(FilterAttribute::Name, "llama"));
        assert!(filters.is_active());
        assert!(filters.remove(FilterAttribute::Name, "llama"));
        assert!(!filters.is_active());
        assert!(!filters.remove(FilterAttribute::Keyword, "x"));
    }

    #[test]
    fn test_total_pages() {
        let page: Page<u8> = Page {
            items: vec![],
            page: 1,
            page_size: 10,
            total_items: 21,
        };
        assert_eq!(page.total_pages(), 3);
    }
}
