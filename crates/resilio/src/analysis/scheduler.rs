//! One-shot deferred execution with explicit handles. Each scheduled run is
//! owned by the job record's lifecycle: the handle stays in the registry
//! until the run finishes, and deleting the record aborts the handle so a
//! stale write can never resurrect a deleted row. One attempt only; there is
//! no retry and no reschedule.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::domain::{ComplianceCheckId, SimulationId};

/// Key identifying a scheduled run across both job kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobKey {
    Simulation(SimulationId),
    Compliance(ComplianceCheckId),
}

/// Registry of in-flight deferred runs. Finished handles are purged lazily
/// whenever the registry is touched.
#[derive(Default)]
pub struct DeferredScheduler {
    tasks: Mutex<HashMap<JobKey, JoinHandle<()>>>,
}

impl DeferredScheduler {
    /// Register `run` to execute once after `delay`. Must be called from
    /// within a tokio runtime.
    pub fn schedule<F>(&self, key: JobKey, delay: Duration, run: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            run.await;
        });

        let mut tasks = self.tasks.lock().expect("scheduler mutex poisoned");
        tasks.retain(|_, task| !task.is_finished());
        tasks.insert(key, handle);
    }

    /// Abort a still-pending run. Returns whether a task was actually
    /// cancelled; runs that already finished are a no-op.
    pub fn cancel(&self, key: &JobKey) -> bool {
        let mut tasks = self.tasks.lock().expect("scheduler mutex poisoned");
        match tasks.remove(key) {
            Some(task) if !task.is_finished() => {
                task.abort();
                debug!(?key, "cancelled pending deferred run");
                true
            }
            Some(_) => false,
            None => false,
        }
    }

    /// Number of runs that have not finished yet.
    pub fn pending_count(&self) -> usize {
        let mut tasks = self.tasks.lock().expect("scheduler mutex poisoned");
        tasks.retain(|_, task| !task.is_finished());
        tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn simulation_key(id: &str) -> JobKey {
        JobKey::Simulation(SimulationId(id.to_string()))
    }

    #[tokio::test]
    async fn scheduled_run_executes_after_the_delay() {
        let scheduler = DeferredScheduler::default();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        scheduler.schedule(
            simulation_key("job-1"),
            Duration::from_millis(10),
            async move {
                flag.store(true, Ordering::Release);
            },
        );
        assert_eq!(scheduler.pending_count(), 1);
        assert!(!ran.load(Ordering::Acquire));

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(ran.load(Ordering::Acquire));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[tokio::test]
    async fn cancel_prevents_a_pending_run() {
        let scheduler = DeferredScheduler::default();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        scheduler.schedule(
            simulation_key("job-2"),
            Duration::from_millis(100),
            async move {
                flag.store(true, Ordering::Release);
            },
        );
        assert!(scheduler.cancel(&simulation_key("job-2")));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!ran.load(Ordering::Acquire));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[tokio::test]
    async fn cancel_after_completion_is_a_noop() {
        let scheduler = DeferredScheduler::default();
        scheduler.schedule(simulation_key("job-3"), Duration::from_millis(5), async {});
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!scheduler.cancel(&simulation_key("job-3")));
    }

    #[tokio::test]
    async fn cancelling_an_unknown_key_is_a_noop() {
        let scheduler = DeferredScheduler::default();
        assert!(!scheduler.cancel(&simulation_key("job-unknown")));
    }
}
