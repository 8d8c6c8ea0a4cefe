//! Background workers for the analysis agent
//!
//! The scheduler polls the job store on a fixed interval and hands at most
//! one pending job per tick to the pipeline executor.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::application::pipeline::PipelineExecutor;

/// Fixed-interval scheduler driving the pipeline executor
///
/// `start` and `stop` are both idempotent. `stop` only cancels the timer; an
/// in-flight pipeline run finishes on its own, and a caller that needs a
/// clean shutdown awaits the handle `stop` returns.
pub struct Scheduler {
    executor: Arc<PipelineExecutor>,
    process_on_startup: bool,
    state: Mutex<Option<RunningWorker>>,
}

struct RunningWorker {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Scheduler {
    /// Create a new scheduler
    ///
    /// With `process_on_startup` set, one sweep runs immediately when the
    /// scheduler starts instead of waiting a full interval.
    pub fn new(executor: Arc<PipelineExecutor>, process_on_startup: bool) -> Self {
        Self {
            executor,
            process_on_startup,
            state: Mutex::new(None),
        }
    }

    /// Start the polling loop; a no-op when already running
    pub fn start(&self, interval: Duration) {
        let mut state = self.state.lock().expect("scheduler state lock poisoned");
        if state.is_some() {
            info!("Scheduler already running, start ignored");
            return;
        }

        let token = CancellationToken::new();
        let worker_token = token.clone();
        let executor = Arc::clone(&self.executor);
        let process_on_startup = self.process_on_startup;

        let handle = tokio::spawn(async move {
            info!(
                interval_seconds = interval.as_secs(),
                "Analysis scheduler started"
            );

            if process_on_startup {
                info!("Performing initial backlog sweep on startup");
                run_tick(&executor).await;
            }

            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; consume it so the loop always
            // waits a full interval before its first timed sweep.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        run_tick(&executor).await;
                    }
                    _ = worker_token.cancelled() => {
                        info!("Analysis scheduler shutting down");
                        break;
                    }
                }
            }
        });

        *state = Some(RunningWorker { token, handle });
    }

    /// Cancel the timer; a no-op when already stopped
    ///
    /// Returns the worker's join handle so callers can await in-flight
    /// completion when they need a clean shutdown.
    pub fn stop(&self) -> Option<JoinHandle<()>> {
        let mut state = self.state.lock().expect("scheduler state lock poisoned");
        match state.take() {
            Some(worker) => {
                worker.token.cancel();
                info!("Analysis scheduler stopped");
                Some(worker.handle)
            }
            None => None,
        }
    }

    /// Whether the polling loop is active
    pub fn is_running(&self) -> bool {
        self.state
            .lock()
            .expect("scheduler state lock poisoned")
            .is_some()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        // Leave no orphaned timer behind.
        if let Ok(mut state) = self.state.lock() {
            if let Some(worker) = state.take() {
                worker.token.cancel();
            }
        }
    }
}

/// One tick: pick and process at most one pending job, isolating any error
/// so the loop keeps running.
async fn run_tick(executor: &PipelineExecutor) {
    match executor.try_process_next().await {
        Ok(Some(result)) if result.success => {
            info!(
                report_id = result.report_external_id.as_deref().unwrap_or("-"),
                tag_count = result.tags.len(),
                "Tick completed: job analyzed"
            );
        }
        Ok(Some(result)) => {
            warn!(
                reason = result.failure_reason.as_deref().unwrap_or("unknown"),
                "Tick completed: job failed"
            );
        }
        Ok(None) => {}
        Err(err) => {
            error!(error = %err, "Pipeline tick failed");
        }
    }
}
