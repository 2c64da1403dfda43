//! Playground command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::commands::PlaygroundCommand;
use crate::error::CliError;
use crate::handlers::find_server;
use crate::presentation::{print_separator, truncate_string};

pub async fn execute(ctx: &CliContext, command: PlaygroundCommand) -> Result<()> {
    match command {
        PlaygroundCommand::Show => show(ctx).await,
        PlaygroundCommand::EnableServer { server } => {
            let server = find_server(&ctx.catalog, &server)?;
            let added = ctx
                .playground()
                .append_mcp_servers(std::slice::from_ref(&server.name))
                .await
                .map_err(CliError::from)?;
            if added.is_empty() {
                println!("{} is already enabled.", server.name);
            } else {
                println!("✓ Enabled {}", server.name);
            }
            Ok(())
        }
        PlaygroundCommand::DisableServer { server } => {
            let server = find_server(&ctx.catalog, &server)?;
            let removed = ctx
                .playground()
                .remove_mcp_server(&server.name)
                .await
                .map_err(CliError::from)?;
            if removed {
                println!("✓ Disabled {}", server.name);
            } else {
                println!("{} was not enabled.", server.name);
            }
            Ok(())
        }
    }
}

async fn show(ctx: &CliContext) -> Result<()> {
    let snapshot = ctx.playground().snapshot().await.map_err(CliError::from)?;

    println!("Profile: {}\n", snapshot.user_profile);

    if snapshot.playground_models.is_empty() {
        println!("No models in the playground.");
        println!("Use 'assetdeck provision model:<id>' to add one.");
    } else {
        println!("{:<24} {:<28} {:<8} Endpoint", "Id", "Name", "External");
        print_separator(100);
        for record in &snapshot.playground_models {
            let external = if snapshot.models_with_endpoints.contains(&record.id) {
                "yes"
            } else {
                "no"
            };
            println!(
                "{:<24} {:<28} {:<8} {}",
                truncate_string(&record.id, 23),
                truncate_string(&record.name, 27),
                external,
                record.endpoint
            );
        }
    }

    println!();
    if snapshot.playground_mcp_servers.is_empty() {
        println!("No MCP servers enabled.");
    } else {
        println!("MCP servers:");
        for name in &snapshot.playground_mcp_servers {
            match snapshot.excluded_tools.get(name) {
                Some(tools) if !tools.is_empty() => {
                    println!("  {name} (excluded: {})", tools.join(", "));
                }
                _ => println!("  {name}"),
            }
        }
    }

    let orphaned: Vec<&str> = snapshot
        .models_with_endpoints
        .iter()
        .filter(|id| !snapshot.playground_models.iter().any(|r| &r.id == *id))
        .map(String::as_str)
        .collect();
    if !orphaned.is_empty() {
        println!();
        println!("External endpoints (not in playground): {}", orphaned.join(", "));
    }

    Ok(())
}
