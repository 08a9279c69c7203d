//! Presentation bridge: primary view → secondary projector window
//!
//! A one-directional broadcast carrying [`PresentationSnapshot`]s. With no
//! window open, emitted snapshots are dropped — no buffering, no
//! replay-on-open. A window that opens later starts in `Idle` until the
//! next event fires, and always displays only the most recently received
//! snapshot (last-value-wins per channel).

use gavel_application::ProjectionSink;
use gavel_domain::PresentationSnapshot;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Sender side, owned by the primary (chair) view
pub struct PresentationBridge {
    // Capacity 1: a lagging window skips straight to the newest snapshot
    channel: broadcast::Sender<PresentationSnapshot>,
}

impl PresentationBridge {
    pub fn new() -> Self {
        let (channel, _) = broadcast::channel(1);
        Self { channel }
    }

    /// Emit a snapshot to the window, if one is open
    pub fn emit(&self, snapshot: PresentationSnapshot) {
        // send errors only when no window is attached; dropping the event
        // is exactly the specified behavior
        let _ = self.channel.send(snapshot);
    }

    /// Open the secondary window and attach its listener
    pub fn open_window(&self) -> PresentationWindow {
        PresentationWindow::attach(self.channel.subscribe(), || {})
    }

    /// Open the secondary window with a close callback invoked in the
    /// primary view when the window goes away
    pub fn open_window_with_close(
        &self,
        on_close: impl FnOnce() + Send + 'static,
    ) -> PresentationWindow {
        PresentationWindow::attach(self.channel.subscribe(), on_close)
    }
}

impl Default for PresentationBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectionSink for PresentationBridge {
    fn project(&self, snapshot: PresentationSnapshot) {
        self.emit(snapshot);
    }
}

/// Receiver side: the projector display surface.
///
/// Holds an owned copy of the latest snapshot for the lifetime of the
/// window — every received payload is an independent value, so the window
/// never aliases the primary's live, continuously-mutated state.
pub struct PresentationWindow {
    latest: watch::Receiver<PresentationSnapshot>,
    cancel: CancellationToken,
}

impl PresentationWindow {
    fn attach(
        mut events: broadcast::Receiver<PresentationSnapshot>,
        on_close: impl FnOnce() + Send + 'static,
    ) -> Self {
        let cancel = CancellationToken::new();
        let (tx, latest) = watch::channel(PresentationSnapshot::Idle);

        let listener_cancel = cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = listener_cancel.cancelled() => break,
                    received = events.recv() => match received {
                        Ok(snapshot) => {
                            let _ = tx.send(snapshot);
                        }
                        // Overwritten while we weren't looking: the next
                        // recv returns the newest snapshot
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
            debug!("Presentation window listener detached");
            on_close();
        });

        Self { latest, cancel }
    }

    /// Snapshot currently on display
    pub fn current(&self) -> PresentationSnapshot {
        self.latest.borrow().clone()
    }

    /// Wait for the display to change. Returns `false` once the window is
    /// closed and no further changes can arrive.
    pub async fn changed(&mut self) -> bool {
        self.latest.changed().await.is_ok()
    }

    /// Close the window: deregisters the listener and fires the close
    /// callback in the primary view
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PresentationWindow {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
