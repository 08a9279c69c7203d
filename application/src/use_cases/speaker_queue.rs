//! Speaker queue manager
//!
//! Coordinates one moderated caucus: enqueueing speakers, advancing the
//! floor, and removing queue entries. Queue order is store-key order and
//! nothing else — no re-ranking is ever applied here.

use crate::config::SessionDefaults;
use crate::ports::document_store::{DocumentStore, encode};
use crate::ports::event_log::{SessionEvent, SessionEventLog};
use gavel_domain::{CaucusState, DomainError, SpeakerEvent, advance_speaker};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Manager for the speaker queue of one caucus
pub struct SpeakerQueueManager {
    store: Arc<dyn DocumentStore>,
    /// Path of the whole caucus document (`committees/{id}/caucuses/{key}`)
    path: String,
    defaults: SessionDefaults,
    event_log: Arc<dyn SessionEventLog>,
    latest: watch::Receiver<Option<CaucusState>>,
    cancel: CancellationToken,
}

impl SpeakerQueueManager {
    /// Subscribe to the caucus document at `path`
    pub async fn start(
        store: Arc<dyn DocumentStore>,
        path: impl Into<String>,
        defaults: SessionDefaults,
        event_log: Arc<dyn SessionEventLog>,
    ) -> Self {
        let path = path.into();
        let cancel = CancellationToken::new();
        let (tx, latest) = watch::channel(None);

        let mut subscription = store.subscribe(&path).await;
        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        snapshot = subscription.next_as::<CaucusState>() => match snapshot {
                            Some(state) => {
                                let _ = tx.send(state);
                            }
                            None => break,
                        },
                    }
                }
            });
        }

        Self {
            store,
            path,
            defaults,
            event_log,
            latest,
            cancel,
        }
    }

    /// Last-known caucus replica
    pub fn current(&self) -> Option<CaucusState> {
        self.latest.borrow().clone()
    }

    /// Observe caucus updates (for render loops)
    pub fn watch(&self) -> watch::Receiver<Option<CaucusState>> {
        self.latest.clone()
    }

    /// Append a speaker to the queue.
    ///
    /// Insertion position comes entirely from the store's monotonic key
    /// generation. Refused locally for a blank member or a closed caucus.
    pub fn enqueue(&self, event: SpeakerEvent) -> Result<String, DomainError> {
        if event.who.trim().is_empty() {
            return Err(DomainError::EmptyField("who"));
        }
        if self.current().is_some_and(|caucus| caucus.is_closed()) {
            return Err(DomainError::CaucusClosed);
        }
        Ok(self
            .store
            .push(&format!("{}/queue", self.path), encode(&event)))
    }

    /// Move the oldest queued speaker onto the floor.
    ///
    /// Commits the whole next caucus state as a single write: queue entry
    /// removed, previous speaker appended to history, speaker timer reset
    /// to the default speech length.
    pub fn advance(&self) -> Result<(), DomainError> {
        let current = self.current().ok_or(DomainError::EmptyQueue)?;
        let history_key = self.store.generate_key();
        let next = advance_speaker(&current, &history_key, self.defaults.speaker_timer())?;

        self.store.write(&self.path, encode(&next));
        self.event_log.record(SessionEvent::speaker_advanced(&next));
        Ok(())
    }

    /// Delete a queue entry by key, independent of position
    pub fn remove(&self, key: &str) {
        self.store.remove(&format!("{}/queue/{}", self.path, key));
    }

    /// End the replica task and release the subscription
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for SpeakerQueueManager {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
