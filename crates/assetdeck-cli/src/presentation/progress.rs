//! Terminal rendering of workflow events with an `indicatif` bar.

use assetdeck_core::WorkflowEvent;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar that follows one provisioning run.
pub struct WorkflowProgress {
    bar: ProgressBar,
}

impl Default for WorkflowProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowProgress {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(100))
    }

    /// A bar that renders nowhere, for tests.
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓░"));
        bar.set_style(style);
        bar.set_length(100);
        Self { bar }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Apply one event. Returns true once the run has ended.
    pub fn apply(&self, event: &WorkflowEvent) -> bool {
        match event {
            WorkflowEvent::RunStarted { asset_names, .. } => {
                self.bar.set_position(0);
                self.bar
                    .println(format!("Provisioning {}", asset_names.join(", ")));
            }
            WorkflowEvent::StepStarted { label, .. } => {
                self.bar.set_message(label.clone());
            }
            WorkflowEvent::Progress { progress, .. } => {
                self.bar.set_position(u64::from(*progress));
                if *progress == 100 {
                    self.bar.set_message("Finishing up");
                }
            }
            WorkflowEvent::PersistenceWarning { message, .. } => {
                self.bar.println(format!("⚠ {message}"));
            }
            WorkflowEvent::Completed { persisted, .. } => {
                self.bar.finish_with_message(format!(
                    "Done ({} newly recorded)",
                    persisted.len()
                ));
            }
            WorkflowEvent::Cancelled { .. } => {
                self.bar.abandon_with_message("Cancelled");
            }
        }
        event.is_terminal()
    }
}
