//! Command-line adapter for assetdeck.
//!
//! `main.rs` parses arguments and calls [`bootstrap`]; every command is a thin
//! handler over the core services.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

// Used only by the binary
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{
    CatalogCommand, Commands, ConfigCommand, ListArgs, PlaygroundCommand, ProfileCommand,
    ToolsCommand,
};
pub use error::CliError;
pub use parser::Cli;
