//! Commands enum and subcommands.

use clap::{Args, Subcommand};

use assetdeck_core::{AssetKey, FilterAttribute, SortKey, UserProfile};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Browse the model and MCP server catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },

    /// Provision assets into the playground
    Provision {
        /// Assets to provision, as model:<id> or mcp:<id>
        #[arg(required = true)]
        keys: Vec<AssetKey>,
        /// Create external endpoints for the selected models instead
        #[arg(long)]
        endpoint: bool,
    },

    /// Inspect or change what the playground has enabled
    Playground {
        #[command(subcommand)]
        command: PlaygroundCommand,
    },

    /// Hide or restore individual MCP server tools
    Tools {
        #[command(subcommand)]
        command: ToolsCommand,
    },

    /// Show or switch the user profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// View or change application settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Show resolved paths for assetdeck data
    Paths,
}

/// Catalog listing commands.
#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List model deployments
    Models(ListArgs),
    /// List MCP servers
    Servers(ListArgs),
}

/// Filtering, sorting and paging options shared by catalog listings.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Filter as attribute=value (name, keyword, useCase, description); repeatable
    #[arg(long = "filter", value_name = "ATTR=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(FilterAttribute, String)>,
    /// Sort by name, status, version or description
    #[arg(long)]
    pub sort: Option<SortKey>,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Entries per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Parse `attribute=value` into a filter entry.
fn parse_filter(raw: &str) -> Result<(FilterAttribute, String), String> {
    let (attribute, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{raw}': expected ATTR=VALUE"))?;
    if value.is_empty() {
        return Err(format!("invalid filter '{raw}': value is empty"));
    }
    Ok((attribute.parse()?, value.to_string()))
}

/// Playground commands.
#[derive(Subcommand)]
pub enum PlaygroundCommand {
    /// Show provisioned models, endpoints, servers and excluded tools
    Show,
    /// Enable an MCP server by id or name
    EnableServer { server: String },
    /// Disable an MCP server by id or name
    DisableServer { server: String },
}

/// Tool exclusion commands.
#[derive(Subcommand)]
pub enum ToolsCommand {
    /// Hide a tool of an MCP server from the playground
    Exclude { server: String, tool: String },
    /// Restore a previously hidden tool
    Include { server: String, tool: String },
}

/// Profile commands.
#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the current profile
    Show,
    /// Switch profile (admin or engineer)
    Set { profile: UserProfile },
}

/// Settings commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current settings
    Show,
    /// Update settings
    Set {
        /// Duration of each provisioning step in milliseconds (0-60000)
        #[arg(long)]
        step_delay_ms: Option<u64>,
        /// Pause before a run completes in milliseconds (0-60000)
        #[arg(long)]
        settle_delay_ms: Option<u64>,
        /// Catalog entries per page (1-100)
        #[arg(long)]
        page_size: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("keyword=chat").unwrap(),
            (FilterAttribute::Keyword, "chat".to_string())
        );
        assert_eq!(
            parse_filter("description=a=b").unwrap(),
            (FilterAttribute::Description, "a=b".to_string())
        );
        assert!(parse_filter("keyword=").is_err());
        assert!(parse_filter("nope=x").unwrap_err().contains("unknown filter attribute"));
    }
}
