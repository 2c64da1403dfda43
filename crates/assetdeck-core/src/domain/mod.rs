//! Core domain types.
//!
//! These are pure data types with no infrastructure dependencies. They are
//! shared by the services, the storage adapters and the CLI.

pub mod asset;
pub mod catalog;
pub mod playground;
pub mod selection;
pub mod workflow;

pub use asset::{
    Asset, AssetDetails, AssetKey, AssetKind, McpServerAsset, ModelAsset,
    PersistedProvisionRecord, RegistrationState, is_valid_slug,
};
pub use catalog::{
    AssetCatalog, CatalogError, CatalogView, EmptyState, FilterAttribute, FilterSet, Page,
    SortDirection, SortKey,
};
pub use playground::{PlaygroundSnapshot, UserProfile};
pub use selection::{SelectionResolutionError, SelectionSet};
pub use workflow::{
    StepTemplate, WorkflowAction, WorkflowError, WorkflowKind, WorkflowPlan, WorkflowRun,
    WorkflowState, WorkflowStep, checkpoint, joined_names,
};
