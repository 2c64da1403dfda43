//! Database path resolution.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::{data_root, ensure_dir};

pub const DATABASE_FILE_NAME: &str = "assetdeck.db";

/// Get the path to the `SQLite` database file, `<data root>/data/assetdeck.db`.
///
/// The `data/` subdirectory is created if it doesn't exist.
pub fn database_path() -> Result<PathBuf, PathError> {
    let data_dir = data_root()?.join("data");
    ensure_dir(&data_dir)?;
    Ok(data_dir.join(DATABASE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::DATA_DIR_ENV;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};

    #[test]
    fn test_database_path_lives_under_data_dir() {
        let _guard = ENV_LOCK.lock().unwrap();
        let root = std::env::temp_dir().join(format!("assetdeck_db_{}", std::process::id()));
        let _env = EnvVarGuard::set(DATA_DIR_ENV, root.to_str().unwrap());

        let path = database_path().unwrap();
        assert_eq!(path, root.join("data").join("assetdeck.db"));
        assert!(root.join("data").is_dir());

        let _ = std::fs::remove_dir_all(&root);
    }
}
