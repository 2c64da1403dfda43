//! Durable playground state as read back from the key/value store.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::asset::PersistedProvisionRecord;

/// Role of the current user. Stored as its display string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserProfile {
    #[serde(rename = "AI Admin")]
    AiAdmin,
    #[default]
    #[serde(rename = "AI Engineer")]
    AiEngineer,
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AiAdmin => write!(f, "AI Admin"),
            Self::AiEngineer => write!(f, "AI Engineer"),
        }
    }
}

impl FromStr for UserProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" | "ai admin" | "ai-admin" => Ok(Self::AiAdmin),
            "engineer" | "ai engineer" | "ai-engineer" => Ok(Self::AiEngineer),
            _ => Err(format!(
                "unknown profile '{s}' (expected 'AI Admin' or 'AI Engineer')"
            )),
        }
    }
}

/// Everything the playground persists, read in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundSnapshot {
    pub playground_models: Vec<PersistedProvisionRecord>,
    pub models_with_endpoints: Vec<String>,
    pub playground_mcp_servers: Vec<String>,
    pub excluded_tools: BTreeMap<String, Vec<String>>,
    pub user_profile: UserProfile,
}
