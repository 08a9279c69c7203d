//! Motion service
//!
//! Holds the replica of the session's unordered motion collection and
//! derives the agenda order from it on demand. Proposals are validated
//! locally before the push; the ranked view is a pure function of the
//! replica and is never written back.

use crate::ports::document_store::{DocumentStore, encode};
use crate::ports::event_log::{SessionEvent, SessionEventLog};
use gavel_domain::{DomainError, MotionData, rank};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Service over the pending motion collection of one session
pub struct MotionService {
    store: Arc<dyn DocumentStore>,
    /// Path of the motion collection (`committees/{id}/motions`)
    path: String,
    event_log: Arc<dyn SessionEventLog>,
    latest: watch::Receiver<BTreeMap<String, MotionData>>,
    cancel: CancellationToken,
}

impl MotionService {
    /// Subscribe to the motion collection at `path`
    pub async fn start(
        store: Arc<dyn DocumentStore>,
        path: impl Into<String>,
        event_log: Arc<dyn SessionEventLog>,
    ) -> Self {
        let path = path.into();
        let cancel = CancellationToken::new();
        let (tx, latest) = watch::channel(BTreeMap::new());

        let mut subscription = store.subscribe(&path).await;
        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        snapshot = subscription.next_as::<BTreeMap<String, MotionData>>() => {
                            match snapshot {
                                Some(map) => {
                                    let _ = tx.send(map.unwrap_or_default());
                                }
                                None => break,
                            }
                        },
                    }
                }
            });
        }

        Self {
            store,
            path,
            event_log,
            latest,
            cancel,
        }
    }

    /// Last-known motion replica, unordered
    pub fn current(&self) -> BTreeMap<String, MotionData> {
        self.latest.borrow().clone()
    }

    /// Observe motion updates (for render loops)
    pub fn watch(&self) -> watch::Receiver<BTreeMap<String, MotionData>> {
        self.latest.clone()
    }

    /// Move a new motion. Refused locally when the type's required fields
    /// are missing; nothing is written in that case.
    pub fn propose(&self, motion: MotionData) -> Result<String, DomainError> {
        motion.validate()?;
        let key = self.store.push(&self.path, encode(&motion));
        self.event_log
            .record(SessionEvent::motion_proposed(&key, &motion));
        Ok(key)
    }

    /// Typed setter for the one field that mutates after proposal
    pub fn second(&self, key: &str, member: impl Into<String>) -> Result<(), DomainError> {
        let member = member.into();
        if member.trim().is_empty() {
            return Err(DomainError::EmptyField("seconder"));
        }
        self.store.write(
            &format!("{}/{}/seconder", self.path, key),
            Value::String(member),
        );
        Ok(())
    }

    /// Withdraw a motion by key
    pub fn remove(&self, key: &str) {
        self.store.remove(&format!("{}/{}", self.path, key));
        self.event_log.record(SessionEvent::motion_removed(key));
    }

    /// The agenda: every pending motion in final visible order.
    ///
    /// Recomputed from the replica on each call; never persisted.
    pub fn ranked(&self) -> Vec<(String, MotionData)> {
        let motions = self.current();
        rank(&motions)
            .into_iter()
            .filter_map(|key| {
                let motion = motions.get(&key).cloned()?;
                Some((key, motion))
            })
            .collect()
    }

    /// End the replica task and release the subscription
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for MotionService {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::event_log::NoSessionEventLog;
    use crate::use_cases::test_support::{MockStore, settle};
    use gavel_domain::{MotionType, TimeUnit};

    const PATH: &str = "committees/ga/motions";

    async fn service(store: &Arc<MockStore>) -> MotionService {
        let service =
            MotionService::start(store.clone(), PATH, Arc::new(NoSessionEventLog)).await;
        settle().await;
        service
    }

    fn motion(kind: MotionType, minutes: u32) -> MotionData {
        MotionData::new(kind, "Brazil")
            .with_proposal("Food security")
            .with_caucus_duration(minutes, TimeUnit::Minutes)
    }

    #[tokio::test]
    async fn test_propose_pushes_motion() {
        let store = MockStore::new();
        let service = service(&store).await;

        let key = service
            .propose(motion(MotionType::OpenModeratedCaucus, 10))
            .unwrap();

        let (path, value) = store.last_write().unwrap();
        assert_eq!(path, format!("{}/{}", PATH, key));
        assert_eq!(value["kind"], "open_moderated_caucus");
    }

    #[tokio::test]
    async fn test_propose_refuses_invalid_motion() {
        let store = MockStore::new();
        let service = service(&store).await;

        let incomplete = MotionData::new(MotionType::OpenModeratedCaucus, "Brazil");
        assert_eq!(
            service.propose(incomplete),
            Err(DomainError::EmptyField("proposal"))
        );
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_second_writes_typed_field() {
        let store = MockStore::new();
        let service = service(&store).await;

        service.second("-K000001", "Kenya").unwrap();

        let (path, value) = store.last_write().unwrap();
        assert_eq!(path, format!("{}/-K000001/seconder", PATH));
        assert_eq!(value, Value::String("Kenya".into()));
    }

    #[tokio::test]
    async fn test_ranked_orders_replica() {
        let store = MockStore::new();
        let service = service(&store).await;

        let mut motions = BTreeMap::new();
        motions.insert("-K0".to_string(), motion(MotionType::OpenModeratedCaucus, 10));
        motions.insert("-K1".to_string(), motion(MotionType::CloseModeratedCaucus, 1));
        motions.insert("-K2".to_string(), motion(MotionType::OpenModeratedCaucus, 11));
        store.write(PATH, encode(&motions));
        settle().await;

        let agenda = service.ranked();
        let keys: Vec<&str> = agenda.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["-K1", "-K2", "-K0"]);
    }

    #[tokio::test]
    async fn test_removed_collection_empties_replica() {
        let store = MockStore::new();
        let service = service(&store).await;

        let mut motions = BTreeMap::new();
        motions.insert("-K0".to_string(), motion(MotionType::OpenModeratedCaucus, 10));
        store.write(PATH, encode(&motions));
        settle().await;
        assert_eq!(service.current().len(), 1);

        store.remove(PATH);
        settle().await;
        assert!(service.current().is_empty());
        assert!(service.ranked().is_empty());
    }

    #[tokio::test]
    async fn test_remove_motion_by_key() {
        let store = MockStore::new();
        let service = service(&store).await;

        service.remove("-K000007");
        assert_eq!(store.removals(), vec![format!("{}/-K000007", PATH)]);
    }
}
