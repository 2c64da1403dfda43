//! Core domain, ports and services for assetdeck.
//!
//! assetdeck browses a catalog of model deployments and MCP servers, lets a
//! user select some of them and runs a simulated provisioning workflow that
//! records the selection as available in the playground.
//!
//! - [`domain`]: catalog, selection and workflow types
//! - [`ports`]: the key/value store, scheduler and event emitter seams
//! - [`services`]: the selection store, catalog projector and workflow engine
//! - [`settings`] and [`paths`]: configuration and data locations

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    Asset, AssetCatalog, AssetDetails, AssetKey, AssetKind, CatalogError, CatalogView, EmptyState,
    FilterAttribute, FilterSet, McpServerAsset, ModelAsset, Page, PersistedProvisionRecord,
    PlaygroundSnapshot, RegistrationState, SelectionResolutionError, SelectionSet, SortDirection,
    SortKey, UserProfile, WorkflowAction, WorkflowError, WorkflowKind, WorkflowPlan, WorkflowRun,
    WorkflowState, WorkflowStep,
};
pub use events::WorkflowEvent;
pub use paths::{PathError, ResolvedPaths, data_root, database_path, env_file_path};
pub use ports::{
    ChannelEmitter, CoreError, InMemoryKeyValueStore, KeyValueStore, NoopEmitter,
    PersistenceError, ScheduledJob, ScheduledTask, Scheduler, TokioScheduler,
    WorkflowEventEmitter,
};
pub use services::{
    CatalogQuery, PersistOutcome, PlaygroundState, Projectable, SelectionStore, SettingsStore,
    WorkflowEngine,
};
pub use settings::{
    DEFAULT_PAGE_SIZE, DEFAULT_SETTLE_DELAY_MS, DEFAULT_STEP_DELAY_MS, Settings, SettingsError,
    SettingsUpdate, validate_settings,
};
