//! CLI entry point and composition root.
//!
//! Infrastructure is wired together only here, via `bootstrap`. Handlers
//! receive a `CliContext` and never open the database themselves.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use assetdeck_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};
use assetdeck_core::paths::env_file_path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    if let Ok(path) = env_file_path()
        && path.exists()
    {
        dotenvy::from_path(&path).ok();
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        eprintln!("Error: {err:#}");
        std::process::exit(code);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    // Paths must work even when the database cannot be opened.
    if matches!(command, Commands::Paths) {
        return handlers::paths::execute();
    }

    let config = CliConfig::with_defaults()?.with_catalog(cli.catalog);
    let ctx = bootstrap(config).await?;

    match command {
        Commands::Catalog { command } => handlers::catalog::execute(&ctx, command),
        Commands::Provision { keys, endpoint } => {
            handlers::provision::execute(&ctx, keys, endpoint).await
        }
        Commands::Playground { command } => handlers::playground::execute(&ctx, command).await,
        Commands::Tools { command } => handlers::tools::execute(&ctx, command).await,
        Commands::Profile { command } => handlers::profile::execute(&ctx, command).await,
        Commands::Config { command } => handlers::config::execute(&ctx, command).await,
        Commands::Paths => handlers::paths::execute(),
    }
}
