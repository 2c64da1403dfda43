//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that validate CLI input, call core services and format
//!   output for the terminal
//!
//! Handlers should NOT access the database directly or hold business logic.

pub mod catalog;
pub mod config;
pub mod paths;
pub mod playground;
pub mod profile;
pub mod provision;
pub mod tools;

use assetdeck_core::{AssetCatalog, McpServerAsset};

use crate::error::CliError;

/// Find an MCP server by id or display name (case-insensitive).
pub(crate) fn find_server<'a>(
    catalog: &'a AssetCatalog,
    server: &str,
) -> Result<&'a McpServerAsset, CliError> {
    catalog
        .mcp_servers()
        .iter()
        .find(|s| s.id == server || s.name.eq_ignore_ascii_case(server))
        .ok_or_else(|| CliError::Arguments(format!("unknown MCP server '{server}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_server_by_id_or_name() {
        let catalog = AssetCatalog::sample();
        assert_eq!(find_server(&catalog, "github").unwrap().name, "GitHub");
        assert_eq!(find_server(&catalog, "SLACK").unwrap().id, "slack");
        assert!(matches!(
            find_server(&catalog, "jira"),
            Err(CliError::Arguments(_))
        ));
    }
}
