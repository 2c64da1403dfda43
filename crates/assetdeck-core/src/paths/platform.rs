//! Data root resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable that overrides the data root.
pub const DATA_DIR_ENV: &str = "ASSETDECK_DATA_DIR";

/// Create `dir` (and parents) unless it already exists as a directory.
pub(super) fn ensure_dir(dir: &Path) -> Result<(), PathError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PathError::NotADirectory(dir.to_path_buf()));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| PathError::CreateFailed {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Get the root directory for application data (database, `.env`).
///
/// Resolution order:
/// 1. `ASSETDECK_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/assetdeck`)
///
/// The directory is created if it doesn't exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var(DATA_DIR_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => dirs::data_dir()
            .ok_or(PathError::NoDataDir)?
            .join("assetdeck"),
    };

    ensure_dir(&root)?;
    Ok(root)
}

/// Path of the optional `.env` file in the data root.
pub fn env_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(".env"))
}
