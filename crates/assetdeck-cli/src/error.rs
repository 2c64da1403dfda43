//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use assetdeck_core::{CatalogError, CoreError, PersistenceError, WorkflowError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument error (unknown asset, bad key).
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Persistence(e) => e.into(),
            CoreError::Workflow(e) => e.into(),
            CoreError::Catalog(e) => e.into(),
            CoreError::Settings(e) => Self::Config(e.to_string()),
        }
    }
}

impl From<PersistenceError> for CliError {
    fn from(err: PersistenceError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<WorkflowError> for CliError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::EmptySelection => Self::Arguments(err.to_string()),
            WorkflowError::InvalidTransition { .. } => Self::Core(err.to_string()),
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidKey(_) => Self::Arguments(err.to_string()),
            CatalogError::DuplicateId { .. }
            | CatalogError::InvalidSlug { .. }
            | CatalogError::Parse(_) => Self::Config(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdeck_core::SettingsError;

    #[test]
    fn test_exit_codes() {
        let err: CliError = CoreError::from(SettingsError::InvalidPageSize(0)).into();
        assert_eq!(err.exit_code(), 78);

        let err: CliError = WorkflowError::EmptySelection.into();
        assert_eq!(err.exit_code(), 2);

        let err: CliError = PersistenceError::Unavailable("locked".into()).into();
        assert_eq!(err.exit_code(), 73);
        assert_eq!(err.to_string(), "Database error: Storage unavailable: locked");
    }

    #[test]
    fn test_catalog_errors() {
        let err: CliError = CatalogError::Parse("eof".into()).into();
        assert!(matches!(err, CliError::Config(_)));
        let err: CliError = CatalogError::InvalidKey("x".into()).into();
        assert!(matches!(err, CliError::Arguments(_)));
    }
}
