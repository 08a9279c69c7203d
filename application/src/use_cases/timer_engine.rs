//! Shared timer engine
//!
//! Drives one remote [`TimerState`]: a subscription task mirrors the
//! authoritative value into a local `watch` channel, and a 1 Hz ticker
//! advances it remotely while it is ticking. Every tick reads the freshest
//! snapshot, so a reset written by another viewer between ticks wins over
//! the local clock — independent tickers on the same path converge instead
//! of diverging.
//!
//! Toggling and duration changes write once and do not touch the local
//! replica; the display updates when the subscription echoes the write.

use crate::ports::document_store::{DocumentStore, encode};
use gavel_domain::{DomainError, TimeUnit, TimerState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Engine for one shared countdown timer
pub struct TimerEngine {
    store: Arc<dyn DocumentStore>,
    path: String,
    latest: watch::Receiver<TimerState>,
    cancel: CancellationToken,
}

impl TimerEngine {
    /// Subscribe to `path` and start the local 1 Hz ticker.
    ///
    /// Both background tasks end when [`shutdown`](Self::shutdown) is
    /// called or the engine is dropped; the subscription is released with
    /// its task.
    pub async fn start(store: Arc<dyn DocumentStore>, path: impl Into<String>) -> Self {
        let path = path.into();
        let cancel = CancellationToken::new();
        let (tx, latest) = watch::channel(TimerState::default());

        let mut subscription = store.subscribe(&path).await;
        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        snapshot = subscription.next_as::<TimerState>() => match snapshot {
                            Some(Some(state)) => {
                                let _ = tx.send(state);
                            }
                            // Path deleted remotely: keep the last known
                            // value until the parent tears us down
                            Some(None) => {}
                            None => break,
                        },
                    }
                }
            });
        }

        {
            let cancel = cancel.clone();
            let store = Arc::clone(&store);
            let path = path.clone();
            let latest = latest.clone();
            tokio::spawn(async move {
                let period = Duration::from_secs(1);
                let mut interval = tokio::time::interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = interval.tick() => {
                            let current = *latest.borrow();
                            if current.ticking {
                                store.write(&path, encode(&current.ticked()));
                            }
                        }
                    }
                }
                debug!("Timer ticker for {} stopped", path);
            });
        }

        Self {
            store,
            path,
            latest,
            cancel,
        }
    }

    /// Last-known authoritative value
    pub fn current(&self) -> TimerState {
        *self.latest.borrow()
    }

    /// Observe timer updates (for render loops)
    pub fn watch(&self) -> watch::Receiver<TimerState> {
        self.latest.clone()
    }

    /// Start or stop the timer with a single remote write.
    ///
    /// No optimistic local update: the visible state changes when the
    /// subscription echoes this write back.
    pub fn toggle(&self) {
        let next = self.current().toggled();
        self.store.write(&self.path, encode(&next));
    }

    /// Reset the duration while stopped.
    ///
    /// Refused without a write for non-positive amounts or while ticking.
    pub fn set_duration(&self, amount: i64, unit: TimeUnit) -> Result<(), DomainError> {
        let next = self.current().with_duration(amount, unit)?;
        self.store.write(&self.path, encode(&next));
        Ok(())
    }

    /// End both background tasks and release the subscription
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockStore, settle};

    const PATH: &str = "committees/ga/timer";

    fn timer(elapsed: u32, remaining: i64, ticking: bool) -> TimerState {
        TimerState {
            elapsed,
            remaining,
            ticking,
        }
    }

    async fn advance_one_second() {
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_write_advancing_values() {
        let store = MockStore::new();
        store.write(PATH, encode(&timer(0, 60, true)));

        let engine = TimerEngine::start(store.clone(), PATH).await;
        settle().await;

        for _ in 0..3 {
            advance_one_second().await;
        }

        let writes = store.writes();
        let last: TimerState = serde_json::from_value(writes.last().unwrap().1.clone()).unwrap();
        assert_eq!(last, timer(3, 57, true));
        // Initial seed + one write per tick
        assert_eq!(writes.len(), 4);

        engine.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_timer_never_writes() {
        let store = MockStore::new();
        store.write(PATH, encode(&timer(0, 60, false)));

        let engine = TimerEngine::start(store.clone(), PATH).await;
        settle().await;

        for _ in 0..5 {
            advance_one_second().await;
        }

        // Only the seed write
        assert_eq!(store.writes().len(), 1);
        assert!(!engine.current().ticking);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_reset_between_ticks_wins() {
        let store = MockStore::new();
        store.write(PATH, encode(&timer(0, 60, true)));

        let engine = TimerEngine::start(store.clone(), PATH).await;
        settle().await;

        advance_one_second().await;

        // Another viewer resets the duration between ticks
        store.write(PATH, encode(&timer(0, 600, true)));
        settle().await;

        advance_one_second().await;

        let last: TimerState =
            serde_json::from_value(store.last_write().unwrap().1).unwrap();
        assert_eq!(last, timer(1, 599, true));

        engine.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_preserves_clock_values() {
        let store = MockStore::new();
        store.write(PATH, encode(&timer(17, 43, false)));

        let engine = TimerEngine::start(store.clone(), PATH).await;
        settle().await;

        engine.toggle();
        settle().await;
        assert_eq!(engine.current(), timer(17, 43, true));

        engine.toggle();
        settle().await;
        assert_eq!(engine.current(), timer(17, 43, false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_duration_validation() {
        let store = MockStore::new();
        store.write(PATH, encode(&timer(10, 50, false)));

        let engine = TimerEngine::start(store.clone(), PATH).await;
        settle().await;
        let writes_before = store.writes().len();

        assert!(engine.set_duration(0, TimeUnit::Minutes).is_err());
        assert!(engine.set_duration(-2, TimeUnit::Seconds).is_err());
        assert_eq!(store.writes().len(), writes_before);

        engine.set_duration(5, TimeUnit::Minutes).unwrap();
        settle().await;
        assert_eq!(engine.current(), timer(0, 300, false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_duration_refused_while_ticking() {
        let store = MockStore::new();
        store.write(PATH, encode(&timer(0, 60, true)));

        let engine = TimerEngine::start(store.clone(), PATH).await;
        settle().await;

        assert_eq!(
            engine.set_duration(5, TimeUnit::Minutes),
            Err(DomainError::TimerRunning)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_ticking() {
        let store = MockStore::new();
        store.write(PATH, encode(&timer(0, 60, true)));

        let engine = TimerEngine::start(store.clone(), PATH).await;
        settle().await;
        advance_one_second().await;

        engine.shutdown();
        settle().await;
        let writes_after_shutdown = store.writes().len();

        for _ in 0..3 {
            advance_one_second().await;
        }
        assert_eq!(store.writes().len(), writes_after_shutdown);
    }
}
