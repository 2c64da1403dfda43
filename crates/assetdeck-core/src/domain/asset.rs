//! Asset domain types.
//!
//! An asset is either a model deployment or an MCP tool server. The two
//! variants share catalog attributes (`AssetDetails`) but carry different
//! connection fields, so every consumer matches on `Asset` exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::CatalogError;

/// Registration state of a model deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationState {
    Registered,
    #[default]
    NotRegistered,
}

/// Catalog attributes shared by every asset variant.
///
/// These are the fields the catalog projector filters and sorts on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetDetails {
    /// Free-form description shown in the catalog.
    pub description: String,
    /// Search keywords (e.g. "chat", "code").
    pub keywords: Vec<String>,
    /// Primary use case label.
    pub use_case: String,
    /// Deployment status label (e.g. "Running", "Stopped").
    pub status: String,
    /// Version string, usually dotted numeric.
    pub version: String,
}

/// A model deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelAsset {
    pub id: String,
    pub name: String,
    pub slug: String,
    /// In-cluster endpoint used by the playground.
    pub internal_endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_token: Option<String>,
    /// Public endpoint, present once an external endpoint has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_token: Option<String>,
    #[serde(default)]
    pub registration_state: RegistrationState,
    #[serde(default)]
    pub details: AssetDetails,
}

/// An MCP tool server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerAsset {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streamable_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streamable_token: Option<String>,
    /// Names of the tools this server exposes.
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub details: AssetDetails,
}

/// Which collection an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetKind {
    Model,
    McpServer,
}

impl AssetKind {
    /// Prefix used in the textual `AssetKey` form.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::McpServer => "mcp",
        }
    }
}

/// Identity of an asset across both collections.
///
/// Ids are only unique within a variant, so a selection has to carry the kind
/// alongside the id. The textual form is `model:<id>` or `mcp:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetKey {
    pub kind: AssetKind,
    pub id: String,
}

impl AssetKey {
    pub fn model(id: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::Model,
            id: id.into(),
        }
    }

    pub fn mcp_server(id: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::McpServer,
            id: id.into(),
        }
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.prefix(), self.id)
    }
}

impl FromStr for AssetKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, id) = s
            .split_once(':')
            .ok_or_else(|| CatalogError::InvalidKey(s.to_string()))?;
        if id.is_empty() {
            return Err(CatalogError::InvalidKey(s.to_string()));
        }
        match prefix {
            "model" => Ok(Self::model(id)),
            "mcp" => Ok(Self::mcp_server(id)),
            _ => Err(CatalogError::InvalidKey(s.to_string())),
        }
    }
}

/// A provisionable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Asset {
    Model(ModelAsset),
    McpServer(McpServerAsset),
}

impl Asset {
    pub fn key(&self) -> AssetKey {
        match self {
            Self::Model(m) => AssetKey::model(&m.id),
            Self::McpServer(s) => AssetKey::mcp_server(&s.id),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Model(m) => &m.id,
            Self::McpServer(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Model(m) => &m.name,
            Self::McpServer(s) => &s.name,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Self::Model(m) => &m.slug,
            Self::McpServer(s) => &s.slug,
        }
    }

    pub const fn details(&self) -> &AssetDetails {
        match self {
            Self::Model(m) => &m.details,
            Self::McpServer(s) => &s.details,
        }
    }

    /// Endpoint shown for the asset in the playground, if it has one.
    pub fn display_endpoint(&self) -> Option<&str> {
        match self {
            Self::Model(m) => Some(
                m.external_endpoint
                    .as_deref()
                    .unwrap_or(&m.internal_endpoint),
            ),
            Self::McpServer(s) => s.streamable_endpoint.as_deref(),
        }
    }

    /// Derive the durable record written when provisioning completes.
    pub fn provision_record(&self) -> PersistedProvisionRecord {
        let (endpoint, token) = match self {
            Self::Model(m) => (
                m.internal_endpoint.clone(),
                m.internal_token.clone().unwrap_or_default(),
            ),
            Self::McpServer(s) => (
                s.streamable_endpoint.clone().unwrap_or_default(),
                s.streamable_token.clone().unwrap_or_default(),
            ),
        };
        PersistedProvisionRecord {
            id: self.id().to_string(),
            name: self.name().to_string(),
            slug: self.slug().to_string(),
            endpoint,
            token,
        }
    }
}

/// Durable record of an asset that completed provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedProvisionRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub endpoint: String,
    pub token: String,
}

/// Check that a slug is URL-safe: lowercase ASCII alphanumerics and `-`,
/// non-empty, without leading or trailing `-`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ModelAsset {
        ModelAsset {
            id: "m1".into(),
            name: "Granite 8B".into(),
            slug: "granite-8b".into(),
            internal_endpoint: "http://granite.internal:8080/v1".into(),
            internal_token: Some("tok-internal".into()),
            external_endpoint: None,
            external_token: None,
            registration_state: RegistrationState::Registered,
            details: AssetDetails::default(),
        }
    }

    #[test]
    fn test_asset_key_round_trips_through_text() {
        let key: AssetKey = "mcp:github".parse().unwrap();
        assert_eq!(key, AssetKey::mcp_server("github"));
        assert_eq!(key.to_string(), "mcp:github");
    }

    #[test]
    fn test_asset_key_rejects_unknown_prefix() {
        assert!(matches!(
            "agent:x".parse::<AssetKey>(),
            Err(CatalogError::InvalidKey(_))
        ));
        assert!("model:".parse::<AssetKey>().is_err());
        assert!("model".parse::<AssetKey>().is_err());
    }

    #[test]
    fn test_model_record_uses_internal_endpoint() {
        let asset = Asset::Model(model());
        let record = asset.provision_record();
        assert_eq!(record.endpoint, "http://granite.internal:8080/v1");
        assert_eq!(record.token, "tok-internal");
        assert_eq!(record.slug, "granite-8b");
    }

    #[test]
    fn test_mcp_record_defaults_missing_fields_to_empty() {
        let asset = Asset::McpServer(McpServerAsset {
            id: "s1".into(),
            name: "GitHub".into(),
            slug: "github".into(),
            streamable_endpoint: None,
            streamable_token: None,
            tools: vec![],
            details: AssetDetails::default(),
        });
        let record = asset.provision_record();
        assert_eq!(record.endpoint, "");
        assert_eq!(record.token, "");
    }

    #[test]
    fn test_display_endpoint_prefers_external() {
        let mut m = model();
        assert_eq!(
            Asset::Model(m.clone()).display_endpoint(),
            Some("http://granite.internal:8080/v1")
        );
        m.external_endpoint = Some("https://api.example.com/granite".into());
        assert_eq!(
            Asset::Model(m).display_endpoint(),
            Some("https://api.example.com/granite")
        );
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("granite-8b"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-granite"));
        assert!(!is_valid_slug("Granite"));
        assert!(!is_valid_slug("granite 8b"));
    }

    #[test]
    fn test_asset_serializes_with_type_tag() {
        let json = serde_json::to_value(Asset::Model(model())).unwrap();
        assert_eq!(json["type"], "model");
        assert_eq!(json["internalEndpoint"], "http://granite.internal:8080/v1");
    }
}
