//! Contract for jobs run by [`crate::infrastructure::scheduler::Scheduler`].

use async_trait::async_trait;

/// A job invoked on every scheduler tick.
///
/// `run` handles its own failures; the scheduler only logs that a tick happened.
#[async_trait]
pub trait PeriodicTask: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self);
}
