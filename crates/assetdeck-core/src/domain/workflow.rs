//! Provisioning workflow types.
//!
//! A workflow run walks a fixed list of labelled steps. Each step has a
//! simulated duration and a progress checkpoint that is reached when the
//! duration elapses.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::asset::Asset;
use crate::settings::Settings;

/// Placeholder substituted with the comma-joined asset names.
pub const NAMES_PLACEHOLDER: &str = "{names}";

/// Which provisioning flow a run executes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowKind {
    /// Add the selected assets to the playground.
    #[default]
    ConfigurePlayground,
    /// Create external endpoints for the selected models.
    CreateEndpoint,
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurePlayground => write!(f, "configure playground"),
            Self::CreateEndpoint => write!(f, "create endpoint"),
        }
    }
}

/// Lifecycle state of the workflow engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowState {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Caller-initiated transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    Start,
    Cancel,
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

/// Errors returned synchronously by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Cannot {action} a workflow that is {from} at {progress}%")]
    InvalidTransition {
        from: WorkflowState,
        action: WorkflowAction,
        progress: u8,
    },

    #[error("Nothing selected to provision")]
    EmptySelection,
}

/// A step template: label with an optional `{names}` placeholder, and how
/// long the step takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTemplate {
    pub template: String,
    pub delay: Duration,
}

impl StepTemplate {
    pub fn new(template: impl Into<String>, delay: Duration) -> Self {
        Self {
            template: template.into(),
            delay,
        }
    }

    /// Render the label for a resolved selection.
    pub fn render(&self, assets: &[Asset]) -> String {
        self.template
            .replace(NAMES_PLACEHOLDER, &joined_names(assets))
    }
}

/// The fixed step list and timings for one workflow kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowPlan {
    pub kind: WorkflowKind,
    pub steps: Vec<StepTemplate>,
    /// Pause between reaching 100% and completing.
    pub settle_delay: Duration,
}

impl WorkflowPlan {
    /// Default plan for `kind`, with delays taken from `settings`.
    pub fn for_kind(kind: WorkflowKind, settings: &Settings) -> Self {
        let step = Duration::from_millis(settings.effective_step_delay_ms());
        let templates: [&str; 3] = match kind {
            WorkflowKind::ConfigurePlayground => [
                "Verifying {names} details",
                "Checking {names} compatibility",
                "Validating your configuration",
            ],
            WorkflowKind::CreateEndpoint => [
                "Provisioning {names} endpoint",
                "Generating access token for {names}",
                "Publishing external endpoint",
            ],
        };
        Self {
            kind,
            steps: templates
                .iter()
                .map(|t| StepTemplate::new(*t, step))
                .collect(),
            settle_delay: Duration::from_millis(settings.effective_settle_delay_ms()),
        }
    }

    /// Render every step label for a resolved selection.
    pub fn render_steps(&self, assets: &[Asset]) -> Vec<WorkflowStep> {
        self.steps
            .iter()
            .map(|s| WorkflowStep {
                label: s.render(assets),
            })
            .collect()
    }

    /// Progress value reached when step `index` completes.
    pub fn checkpoint(&self, index: usize) -> u8 {
        checkpoint(index, self.steps.len())
    }

    /// Every progress value a run of this plan can report, starting at 0.
    pub fn checkpoints(&self) -> Vec<u8> {
        std::iter::once(0)
            .chain((0..self.steps.len()).map(|i| self.checkpoint(i)))
            .collect()
    }
}

/// Progress reached after step `index` of `total` completes.
///
/// Intermediate steps floor `100 * (index + 1) / total`; the last step is
/// always exactly 100.
pub fn checkpoint(index: usize, total: usize) -> u8 {
    if total == 0 || index + 1 >= total {
        return 100;
    }
    // index + 1 < total, so the quotient is below 100
    u8::try_from(100 * (index + 1) / total).unwrap_or(100)
}

/// Human readable, comma-joined asset names.
pub fn joined_names(assets: &[Asset]) -> String {
    assets
        .iter()
        .map(Asset::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A labelled step of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub label: String,
}

/// Snapshot of one provisioning attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRun {
    /// Generation number; increases with every run and every cancellation.
    pub run_id: u64,
    pub kind: WorkflowKind,
    pub steps: Vec<WorkflowStep>,
    /// Step currently executing; equals `steps.len()` once all steps are done.
    pub current_step_index: usize,
    /// Percentage in `[0, 100]`.
    pub progress: u8,
    pub state: WorkflowState,
    pub assets: Vec<Asset>,
    pub started_at: DateTime<Utc>,
}

impl WorkflowRun {
    /// Label of the step being executed, if any.
    pub fn current_step(&self) -> Option<&WorkflowStep> {
        self.steps.get(self.current_step_index)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            WorkflowState::Completed | WorkflowState::Cancelled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::{AssetDetails, ModelAsset, RegistrationState};

    fn named(name: &str) -> Asset {
        Asset::Model(ModelAsset {
            id: name.into(),
            name: name.into(),
            slug: name.to_lowercase(),
            internal_endpoint: format!("http://{name}"),
            internal_token: None,
            external_endpoint: None,
            external_token: None,
            registration_state: RegistrationState::Registered,
            details: AssetDetails::default(),
        })
    }

    #[test]
    fn test_three_step_checkpoints() {
        let plan = WorkflowPlan::for_kind(WorkflowKind::ConfigurePlayground, &Settings::with_defaults());
        assert_eq!(plan.checkpoints(), vec![0, 33, 66, 100]);
    }

    #[test]
    fn test_checkpoint_last_step_is_100() {
        assert_eq!(checkpoint(0, 1), 100);
        assert_eq!(checkpoint(1, 2), 100);
        assert_eq!(checkpoint(0, 2), 50);
        assert_eq!(checkpoint(5, 7), 85);
        assert_eq!(checkpoint(6, 7), 100);
    }

    #[test]
    fn test_render_configure_labels() {
        let plan = WorkflowPlan::for_kind(WorkflowKind::ConfigurePlayground, &Settings::with_defaults());
        let steps = plan.render_steps(&[named("modelA"), named("modelB")]);
        let labels: Vec<_> = steps.into_iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                "Verifying modelA, modelB details",
                "Checking modelA, modelB compatibility",
                "Validating your configuration",
            ]
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let plan = WorkflowPlan::for_kind(WorkflowKind::CreateEndpoint, &Settings::with_defaults());
        let assets = [named("x"), named("y")];
        assert_eq!(plan.render_steps(&assets), plan.render_steps(&assets));
    }

    #[test]
    fn test_plan_uses_settings_delays() {
        let settings = Settings {
            step_delay_ms: Some(10),
            settle_delay_ms: Some(20),
            ..Settings::with_defaults()
        };
        let plan = WorkflowPlan::for_kind(WorkflowKind::CreateEndpoint, &settings);
        assert!(plan.steps.iter().all(|s| s.delay == Duration::from_millis(10)));
        assert_eq!(plan.settle_delay, Duration::from_millis(20));
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = WorkflowError::InvalidTransition {
            from: WorkflowState::Running,
            action: WorkflowAction::Cancel,
            progress: 66,
        };
        assert_eq!(err.to_string(), "Cannot cancel a workflow that is running at 66%");
    }
}
