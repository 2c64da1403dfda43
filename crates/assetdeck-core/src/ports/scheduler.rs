//! Timer scheduling port.
//!
//! The workflow engine never sleeps itself. It hands each delayed step to a
//! `Scheduler` and keeps the returned handle so a pending step can be revoked.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Work to run once a delay elapses.
pub type ScheduledJob = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Handle to a scheduled job.
pub trait ScheduledTask: Send + Sync {
    /// Revoke the job. Has no effect if it already ran.
    fn cancel(&self);
}

/// Runs jobs after a delay without blocking the caller.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, job: ScheduledJob) -> Box<dyn ScheduledTask>;
}

/// `Scheduler` backed by tokio timers.
///
/// Jobs are spawned on the runtime captured at construction, so `schedule`
/// may be called from any thread.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Capture the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

struct TokioTask(AbortHandle);

impl ScheduledTask for TokioTask {
    fn cancel(&self) {
        self.0.abort();
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, job: ScheduledJob) -> Box<dyn ScheduledTask> {
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            job.await;
        });
        Box::new(TokioTask(task.abort_handle()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_job(counter: &Arc<AtomicUsize>) -> ScheduledJob {
        let counter = Arc::clone(counter);
        Box::pin(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_runs_after_delay() {
        let scheduler = TokioScheduler::current();
        let counter = Arc::new(AtomicUsize::new(0));
        let _task = scheduler.schedule(Duration::from_millis(100), counting_job(&counter));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_job_never_runs() {
        let scheduler = TokioScheduler::current();
        let counter = Arc::new(AtomicUsize::new(0));
        let task = scheduler.schedule(Duration::from_millis(100), counting_job(&counter));

        task.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_run_is_harmless() {
        let scheduler = TokioScheduler::current();
        let counter = Arc::new(AtomicUsize::new(0));
        let task = scheduler.schedule(Duration::ZERO, counting_job(&counter));

        tokio::time::sleep(Duration::from_millis(1)).await;
        task.cancel();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
