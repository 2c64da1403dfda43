//! Timer-driven provisioning workflow.
//!
//! A run walks its plan one step at a time. Each step is a job handed to the
//! `Scheduler`; when it fires the engine records the step's checkpoint and
//! schedules the next one. After the last step a settle delay elapses, the
//! selection is persisted and the run completes.
//!
//! Every job carries the generation it was scheduled for. Starting or
//! cancelling a run bumps the generation, so a job that fires late finds a
//! different generation and does nothing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use super::selection_store::SelectionStore;
use crate::domain::{
    Asset, WorkflowAction, WorkflowError, WorkflowKind, WorkflowPlan, WorkflowRun, WorkflowState,
};
use crate::events::WorkflowEvent;
use crate::ports::{ScheduledJob, ScheduledTask, Scheduler, WorkflowEventEmitter};
use crate::settings::Settings;

#[derive(Default)]
struct EngineState {
    state: WorkflowState,
    run: Option<WorkflowRun>,
    plan: Option<WorkflowPlan>,
    generation: u64,
    pending: Option<Box<dyn ScheduledTask>>,
    /// Set once the completion write has begun; cancel is refused from then on.
    finalizing: bool,
}

impl EngineState {
    fn progress(&self) -> u8 {
        self.run.as_ref().map_or(0, |r| r.progress)
    }

    /// True before the first step completes or once the last one has.
    ///
    /// Checked against the step index as well as progress: plans with more
    /// than 100 steps report 0 after their first step.
    fn in_cancel_window(&self) -> bool {
        if self.finalizing {
            return false;
        }
        self.run.as_ref().is_none_or(|run| {
            (run.current_step_index == 0 && run.progress == 0) || run.progress == 100
        })
    }

    fn revoke_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.cancel();
        }
    }

    fn set_state(&mut self, state: WorkflowState) {
        self.state = state;
        if let Some(run) = self.run.as_mut() {
            run.state = state;
        }
    }

    /// True if a job scheduled for `generation` may still act.
    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation && self.state == WorkflowState::Running
    }
}

struct Shared {
    state: Mutex<EngineState>,
    selection: Arc<SelectionStore>,
    scheduler: Arc<dyn Scheduler>,
    emitter: Arc<dyn WorkflowEventEmitter>,
    settings: Settings,
}

/// Single-flight provisioning state machine.
///
/// Cloning is cheap; clones drive the same engine.
#[derive(Clone)]
pub struct WorkflowEngine {
    inner: Arc<Shared>,
}

impl WorkflowEngine {
    /// Create an idle engine.
    ///
    /// `scheduler` must not run jobs synchronously from `schedule`.
    /// Events are emitted while the engine lock is held so they arrive in
    /// order; `emitter` must not call back into the engine.
    pub fn new(
        selection: Arc<SelectionStore>,
        scheduler: Arc<dyn Scheduler>,
        emitter: Arc<dyn WorkflowEventEmitter>,
        settings: Settings,
    ) -> Self {
        Self {
            inner: Arc::new(Shared {
                state: Mutex::new(EngineState::default()),
                selection,
                scheduler,
                emitter,
                settings,
            }),
        }
    }

    pub fn selection(&self) -> &Arc<SelectionStore> {
        &self.inner.selection
    }

    pub fn state(&self) -> WorkflowState {
        self.inner.lock().state
    }

    /// The current or most recent run.
    pub fn snapshot(&self) -> Option<WorkflowRun> {
        self.inner.lock().run.clone()
    }

    /// Commit the working selection and start a run of `kind`.
    pub fn start(&self, kind: WorkflowKind) -> Result<WorkflowRun, WorkflowError> {
        let assets = self.inner.selection.commit();
        self.start_with_assets(kind, assets)
    }

    /// Start a run of `kind` for already-resolved `assets`.
    pub fn start_with_assets(
        &self,
        kind: WorkflowKind,
        assets: Vec<Asset>,
    ) -> Result<WorkflowRun, WorkflowError> {
        let plan = WorkflowPlan::for_kind(kind, &self.inner.settings);
        Shared::begin(&self.inner, plan, assets)
    }

    /// Start a run with a custom plan.
    pub fn start_with_plan(
        &self,
        plan: WorkflowPlan,
        assets: Vec<Asset>,
    ) -> Result<WorkflowRun, WorkflowError> {
        Shared::begin(&self.inner, plan, assets)
    }

    /// Cancel the current run.
    ///
    /// A running workflow can only be cancelled before its first step
    /// completes or while it settles at 100%. Otherwise the run is left untouched and
    /// `InvalidTransition` is returned.
    pub fn cancel(&self) -> Result<(), WorkflowError> {
        let mut st = self.inner.lock();

        if st.state == WorkflowState::Running {
            let progress = st.progress();
            if !st.in_cancel_window() {
                return Err(WorkflowError::InvalidTransition {
                    from: st.state,
                    action: WorkflowAction::Cancel,
                    progress,
                });
            }

            st.revoke_pending();
            st.generation += 1;
            if let Some(run) = st.run.as_mut() {
                run.progress = 0;
                run.current_step_index = 0;
            }
            st.set_state(WorkflowState::Cancelled);

            let run_id = st.run.as_ref().map_or(st.generation, |r| r.run_id);
            info!(run_id, progress, "Provisioning run cancelled");
            self.inner.emitter.emit(WorkflowEvent::Cancelled { run_id });
        } else {
            debug!(from = %st.state, "Cancel outside of a run");
            st.set_state(WorkflowState::Cancelled);
        }

        drop(st);
        self.inner.selection.clear();
        Ok(())
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(
        this: &Arc<Self>,
        plan: WorkflowPlan,
        assets: Vec<Asset>,
    ) -> Result<WorkflowRun, WorkflowError> {
        let mut st = this.lock();

        if st.state == WorkflowState::Running {
            return Err(WorkflowError::InvalidTransition {
                from: st.state,
                action: WorkflowAction::Start,
                progress: st.progress(),
            });
        }
        if assets.is_empty() {
            return Err(WorkflowError::EmptySelection);
        }

        st.revoke_pending();
        st.generation += 1;
        st.finalizing = false;

        let generation = st.generation;
        let run = WorkflowRun {
            run_id: generation,
            kind: plan.kind,
            steps: plan.render_steps(&assets),
            current_step_index: 0,
            progress: 0,
            state: WorkflowState::Running,
            assets,
            started_at: Utc::now(),
        };
        st.state = WorkflowState::Running;
        st.run = Some(run.clone());

        info!(
            run_id = generation,
            kind = %run.kind,
            assets = run.assets.len(),
            "Provisioning run started"
        );
        this.emitter.emit(WorkflowEvent::run_started(&run));

        let first_delay = plan.steps.first().map(|t| t.delay);
        let first_label = run.steps.first().map(|s| s.label.clone());
        match (first_delay, first_label) {
            (Some(delay), Some(label)) => {
                this.emitter
                    .emit(WorkflowEvent::step_started(generation, 0, label));
                st.plan = Some(plan);
                this.schedule_step(&mut st, generation, 0, delay);
            }
            _ => {
                // A plan without steps goes straight to the settle window.
                if let Some(r) = st.run.as_mut() {
                    r.progress = 100;
                }
                this.emitter.emit(WorkflowEvent::progress(generation, 100));
                let settle = plan.settle_delay;
                st.plan = Some(plan);
                this.schedule_settle(&mut st, generation, settle);
            }
        }

        Ok(st.run.clone().unwrap_or(run))
    }

    fn schedule_step(
        self: &Arc<Self>,
        st: &mut EngineState,
        generation: u64,
        index: usize,
        delay: Duration,
    ) {
        let weak: Weak<Self> = Arc::downgrade(self);
        let job: ScheduledJob = Box::pin(async move {
            if let Some(shared) = weak.upgrade() {
                shared.on_step_elapsed(generation, index);
            }
        });
        st.pending = Some(self.scheduler.schedule(delay, job));
    }

    fn schedule_settle(self: &Arc<Self>, st: &mut EngineState, generation: u64, delay: Duration) {
        let weak: Weak<Self> = Arc::downgrade(self);
        let job: ScheduledJob = Box::pin(async move {
            if let Some(shared) = weak.upgrade() {
                shared.on_settled(generation).await;
            }
        });
        st.pending = Some(self.scheduler.schedule(delay, job));
    }

    fn on_step_elapsed(self: &Arc<Self>, generation: u64, index: usize) {
        let mut st = self.lock();
        if !st.is_current(generation) {
            debug!(generation, index, "Ignoring stale step timer");
            return;
        }
        st.pending = None;

        let Some(plan) = st.plan.clone() else {
            return;
        };
        let progress = plan.checkpoint(index);
        let next = index + 1;

        let Some(run) = st.run.as_mut() else {
            return;
        };
        run.progress = progress;
        debug!(run_id = generation, index, progress, "Step finished");
        self.emitter.emit(WorkflowEvent::progress(generation, progress));

        if let Some(template) = plan.steps.get(next) {
            run.current_step_index = next;
            let label = run.steps.get(next).map(|s| s.label.clone()).unwrap_or_default();
            self.emitter
                .emit(WorkflowEvent::step_started(generation, next, label));
            self.schedule_step(&mut st, generation, next, template.delay);
        } else {
            run.current_step_index = run.steps.len();
            self.schedule_settle(&mut st, generation, plan.settle_delay);
        }
    }

    async fn on_settled(self: Arc<Self>, generation: u64) {
        let (assets, kind) = {
            let mut st = self.lock();
            if !st.is_current(generation) {
                debug!(generation, "Ignoring stale settle timer");
                return;
            }
            st.pending = None;
            st.finalizing = true;
            match st.run.as_ref() {
                Some(run) => (run.assets.clone(), run.kind),
                None => return,
            }
        };

        let outcome = self.selection.persist(&assets, kind).await;

        let mut st = self.lock();
        if st.generation != generation {
            return;
        }
        for warning in &outcome.warnings {
            self.emitter.emit(WorkflowEvent::PersistenceWarning {
                run_id: generation,
                message: warning.to_string(),
            });
        }

        self.selection.clear();
        st.finalizing = false;
        if let Some(run) = st.run.as_mut() {
            run.progress = 0;
            run.current_step_index = 0;
        }
        st.set_state(WorkflowState::Completed);

        info!(
            run_id = generation,
            %kind,
            persisted = outcome.added.len(),
            warnings = outcome.warnings.len(),
            "Provisioning run completed"
        );
        self.emitter.emit(WorkflowEvent::Completed {
            run_id: generation,
            kind,
            persisted: outcome.added,
        });
    }
}
