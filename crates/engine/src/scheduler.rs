//! Spawn scheduler - a cancellable periodic task
//!
//! The scheduler knows nothing about the game. It runs a callback once per
//! period on a tokio runtime until the callback returns `ControlFlow::Break`
//! or the scheduler is stopped. The first tick fires one full period after
//! `start`, never immediately.
//!
//! The period is fixed for the lifetime of a task; a new cadence requires a new
//! `start`.

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

#[derive(Debug, Default)]
pub struct SpawnScheduler {
    task: Option<JoinHandle<()>>,
    period: Option<Duration>,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `period`, replacing any running task
    pub fn start<F>(&mut self, runtime: &Handle, period: Duration, mut on_tick: F)
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        self.stop();

        let task = runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if on_tick().is_break() {
                    break;
                }
            }
        });

        log::debug!("spawn scheduler started ({:?} period)", period);
        self.task = Some(task);
        self.period = Some(period);
    }

    /// Cancel the task. Stopping a stopped scheduler is a no-op.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log::debug!("spawn scheduler stopped");
        }
    }

    /// True while a task exists and has not finished on its own
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Period of the most recently started task
    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl Drop for SpawnScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
