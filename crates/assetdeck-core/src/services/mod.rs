//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports and domain logic. They never touch a
//! concrete store, timer or transport directly.

mod catalog_projector;
mod playground_state;
mod selection_store;
mod settings_store;
mod workflow_engine;

pub use catalog_projector::{
    CatalogQuery, Projectable, compare_versions, filter, matches, paginate, sort,
};
pub use playground_state::{PlaygroundState, keys};
pub use selection_store::{PersistOutcome, SelectionStore};
pub use settings_store::SettingsStore;
pub use workflow_engine::WorkflowEngine;
