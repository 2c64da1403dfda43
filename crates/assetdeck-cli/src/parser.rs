//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Browse the asset catalog and provision models and MCP servers into the playground.
#[derive(Parser)]
#[command(name = "assetdeck")]
#[command(about = "Browse and provision AI assets into the playground")]
#[command(version)]
pub struct Cli {
    /// Load the catalog from a JSON file instead of the built-in sample
    #[arg(long, global = true, env = "ASSETDECK_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
