//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Storage is string keyed with JSON string values; typed access lives in services
//! - Timers go through `Scheduler` so tests and adapters can drive them

pub mod event_emitter;
pub mod key_value_store;
pub mod scheduler;

use thiserror::Error;

use crate::domain::{CatalogError, WorkflowError};
use crate::settings::SettingsError;

pub use event_emitter::{ChannelEmitter, NoopEmitter, WorkflowEventEmitter};
pub use key_value_store::{InMemoryKeyValueStore, KeyValueStore};
pub use scheduler::{ScheduledJob, ScheduledTask, Scheduler, TokioScheduler};

/// Errors raised by the durable key/value store.
///
/// This error type abstracts away storage implementation details (e.g. sqlx
/// errors). Callers on the provisioning path treat it as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The store cannot be reached or is disabled.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the store quota.
    #[error("Storage quota exceeded while writing {key}")]
    QuotaExceeded { key: String },

    /// A stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, etc.).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
