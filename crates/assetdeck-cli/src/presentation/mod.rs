//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod progress;
pub mod tables;

pub use progress::WorkflowProgress;
pub use tables::{format_optional, print_separator, truncate_string};
