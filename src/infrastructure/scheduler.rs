//! Process-wide scheduler for periodic background jobs.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::domain::periodic_task::PeriodicTask;

/// Runs [`PeriodicTask`]s on fixed intervals until [`Scheduler::shutdown`].
///
/// Each task gets its own spawned loop. The first run happens one full period
/// after scheduling. A tick that overruns delays the next one instead of bursting.
pub struct Scheduler {
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            shutdown_tx,
            handles: Vec::new(),
        }
    }

    /// Starts running `task` every `every`.
    pub fn schedule(&mut self, task: Arc<dyn PeriodicTask>, every: Duration) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        let handle = tokio::spawn(async move {
            let name = task.name();
            tracing::info!(task = name, every_secs = every.as_secs(), "Periodic task scheduled");

            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tracing::debug!(task = name, "Periodic task tick");
                        task.run().await;
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }

            tracing::info!(task = name, "Periodic task stopped");
        });

        self.handles.push(handle);
    }

    pub fn task_count(&self) -> usize {
        self.handles.len()
    }

    /// Signals every task to stop and waits for them.
    ///
    /// A task in the middle of a run finishes that run first.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);

        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Periodic task ended abnormally");
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
