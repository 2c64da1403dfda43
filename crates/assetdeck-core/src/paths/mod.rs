//! Path utilities for assetdeck data directories.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No terminal I/O; adapters decide how to report failures
//! - `ASSETDECK_DATA_DIR` overrides every platform default

mod database;
mod error;
mod platform;
mod resolver;

#[cfg(test)]
mod test_utils;

pub use database::{DATABASE_FILE_NAME, database_path};
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root, env_file_path};
pub use resolver::ResolvedPaths;
