//! Settings domain types and validation.
//!
//! These are pure domain types with no infrastructure dependencies. They are
//! persisted as JSON by `services::SettingsStore`.

use serde::{Deserialize, Serialize};

/// Default duration of one simulated provisioning step.
pub const DEFAULT_STEP_DELAY_MS: u64 = 1500;

/// Default pause between reaching 100% and completing a run.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;

/// Default catalog page size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound for any simulated delay.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Upper bound for the catalog page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Duration of each workflow step in milliseconds.
    pub step_delay_ms: Option<u64>,

    /// Pause after the last step before the run completes, in milliseconds.
    pub settle_delay_ms: Option<u64>,

    /// Number of catalog entries per page.
    pub page_size: Option<usize>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            step_delay_ms: Some(DEFAULT_STEP_DELAY_MS),
            settle_delay_ms: Some(DEFAULT_SETTLE_DELAY_MS),
            page_size: Some(DEFAULT_PAGE_SIZE),
        }
    }

    #[must_use]
    pub const fn effective_step_delay_ms(&self) -> u64 {
        match self.step_delay_ms {
            Some(ms) => ms,
            None => DEFAULT_STEP_DELAY_MS,
        }
    }

    #[must_use]
    pub const fn effective_settle_delay_ms(&self) -> u64 {
        match self.settle_delay_ms {
            Some(ms) => ms,
            None => DEFAULT_SETTLE_DELAY_MS,
        }
    }

    #[must_use]
    pub const fn effective_page_size(&self) -> usize {
        match self.page_size {
            Some(size) => size,
            None => DEFAULT_PAGE_SIZE,
        }
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ms) = other.step_delay_ms {
            self.step_delay_ms = ms;
        }
        if let Some(ms) = other.settle_delay_ms {
            self.settle_delay_ms = ms;
        }
        if let Some(size) = other.page_size {
            self.page_size = size;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset field to its default
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub step_delay_ms: Option<Option<u64>>,
    pub settle_delay_ms: Option<Option<u64>>,
    pub page_size: Option<Option<usize>>,
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Delay must be at most 60000 ms, got {0}")]
    InvalidDelay(u64),

    #[error("Page size must be between 1 and 100, got {0}")]
    InvalidPageSize(usize),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(ms) = settings.step_delay_ms {
        if ms > MAX_DELAY_MS {
            return Err(SettingsError::InvalidDelay(ms));
        }
    }
    if let Some(ms) = settings.settle_delay_ms {
        if ms > MAX_DELAY_MS {
            return Err(SettingsError::InvalidDelay(ms));
        }
    }
    if let Some(size) = settings.page_size {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(SettingsError::InvalidPageSize(size));
        }
    }
    Ok(())
}
