//! `SQLite` persistence for assetdeck.
//!
//! Implements the core `KeyValueStore` port on a single `kv_store` table so
//! the playground keys and settings survive between CLI invocations.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

pub use factory::StoreFactory;

pub use repositories::SqliteKeyValueStore;

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
