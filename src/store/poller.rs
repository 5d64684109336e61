//! Cancellable background refresh of a collection store

use super::{CollectionStore, Record};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Shortest period a poller accepts; shorter ones are raised to it
pub const MIN_PERIOD: Duration = Duration::from_millis(250);

/// Handle to a task that reloads a store at a fixed interval
///
/// The task lives until [`stop`](Poller::stop) is awaited or the handle is
/// dropped; dropping aborts it. A reload in flight when the poller is stopped
/// is cancelled, not awaited.
pub struct Poller {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    period: Duration,
}

impl Poller {
    /// Start reloading `store` every `period`
    ///
    /// The first reload happens one period after the call; the owner is
    /// expected to have loaded the store itself when activating.
    ///
    /// A period below [`MIN_PERIOD`] is raised to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<R: Record>(store: CollectionStore<R>, period: Duration) -> Self {
        let period = if period < MIN_PERIOD {
            tracing::warn!(
                resource = R::RESOURCE,
                requested = ?period,
                using = ?MIN_PERIOD,
                "refresh period too short"
            );
            MIN_PERIOD
        } else {
            period
        };
        let (shutdown, mut stop) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::debug!(resource = R::RESOURCE, ?period, "poller started");
            loop {
                tokio::select! {
                    _ = &mut stop => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    _ = &mut stop => break,
                    result = store.load() => {
                        if let Err(err) = result {
                            tracing::debug!(resource = R::RESOURCE, error = %err, "background reload failed");
                        }
                    }
                }
            }
            tracing::debug!(resource = R::RESOURCE, "poller stopped");
        });

        Self {
            shutdown: Some(shutdown),
            task: Some(task),
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the background task is still alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the task and wait for it to exit
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
