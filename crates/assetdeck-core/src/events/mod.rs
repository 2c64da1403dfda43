//! Workflow events emitted while a provisioning run progresses.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag and camelCase fields:
//!
//! ```json
//! { "type": "progress", "runId": 3, "progress": 66 }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{AssetKey, WorkflowKind, WorkflowRun};

/// Events describing one run, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WorkflowEvent {
    /// A run entered `Running` with its rendered step labels.
    RunStarted {
        run_id: u64,
        kind: WorkflowKind,
        steps: Vec<String>,
        asset_names: Vec<String>,
    },

    /// Step `index` is executing; its checkpoint is reached when it finishes.
    StepStarted {
        run_id: u64,
        index: usize,
        label: String,
    },

    /// Progress reached a new checkpoint.
    Progress { run_id: u64, progress: u8 },

    /// The durable store rejected a write; the run still completes.
    PersistenceWarning { run_id: u64, message: String },

    /// The run finished and its selection was persisted.
    Completed {
        run_id: u64,
        kind: WorkflowKind,
        /// Assets newly recorded by this run (already-present ones are omitted).
        persisted: Vec<AssetKey>,
    },

    /// The run was cancelled before any state was persisted.
    Cancelled { run_id: u64 },
}

impl WorkflowEvent {
    /// Create a run started event from a fresh run snapshot.
    pub fn run_started(run: &WorkflowRun) -> Self {
        Self::RunStarted {
            run_id: run.run_id,
            kind: run.kind,
            steps: run.steps.iter().map(|s| s.label.clone()).collect(),
            asset_names: run.assets.iter().map(|a| a.name().to_string()).collect(),
        }
    }

    pub fn step_started(run_id: u64, index: usize, label: impl Into<String>) -> Self {
        Self::StepStarted {
            run_id,
            index,
            label: label.into(),
        }
    }

    pub const fn progress(run_id: u64, progress: u8) -> Self {
        Self::Progress { run_id, progress }
    }

    pub const fn run_id(&self) -> u64 {
        match self {
            Self::RunStarted { run_id, .. }
            | Self::StepStarted { run_id, .. }
            | Self::Progress { run_id, .. }
            | Self::PersistenceWarning { run_id, .. }
            | Self::Completed { run_id, .. }
            | Self::Cancelled { run_id } => *run_id,
        }
    }

    /// True for events that end a run.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Cancelled { .. })
    }
}
