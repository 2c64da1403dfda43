//! Tools command handler.
//!
//! Exclusions are stored per server display name.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::commands::ToolsCommand;
use crate::error::CliError;
use crate::handlers::find_server;

pub async fn execute(ctx: &CliContext, command: ToolsCommand) -> Result<()> {
    let (server, tool, excluded) = match command {
        ToolsCommand::Exclude { server, tool } => (server, tool, true),
        ToolsCommand::Include { server, tool } => (server, tool, false),
    };

    let server = find_server(&ctx.catalog, &server)?;
    if !server.tools.iter().any(|t| t == &tool) {
        return Err(CliError::Arguments(format!(
            "{} has no tool '{tool}' (available: {})",
            server.name,
            server.tools.join(", ")
        ))
        .into());
    }

    let changed = ctx
        .playground()
        .set_tool_excluded(&server.name, &tool, excluded)
        .await
        .map_err(CliError::from)?;

    match (changed, excluded) {
        (true, true) => println!("✓ Excluded {tool} from {}", server.name),
        (true, false) => println!("✓ Included {tool} for {}", server.name),
        (false, true) => println!("{tool} is already excluded from {}", server.name),
        (false, false) => println!("{tool} is not excluded from {}", server.name),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};

    #[tokio::test]
    async fn test_exclude_and_include() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = bootstrap(CliConfig {
            database_path: dir.path().join("assetdeck.db"),
            catalog_path: None,
        })
        .await
        .unwrap();

        execute(
            &ctx,
            ToolsCommand::Exclude {
                server: "github".into(),
                tool: "create_issue".into(),
            },
        )
        .await
        .unwrap();
        let excluded = ctx.playground().excluded_tools().await.unwrap();
        assert_eq!(excluded.get("GitHub"), Some(&vec!["create_issue".to_string()]));

        execute(
            &ctx,
            ToolsCommand::Include {
                server: "GitHub".into(),
                tool: "create_issue".into(),
            },
        )
        .await
        .unwrap();
        assert!(ctx.playground().excluded_tools().await.unwrap().is_empty());

        let err = execute(
            &ctx,
            ToolsCommand::Exclude {
                server: "github".into(),
                tool: "delete_repo".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::Arguments(_))));
    }
}
