//! Paths command handler.

use anyhow::Result;

use assetdeck_core::paths::ResolvedPaths;

/// Resolve and print every path assetdeck uses in `key = value` format.
pub fn execute() -> Result<()> {
    let paths = ResolvedPaths::resolve()?;
    println!("{paths}");
    Ok(())
}
