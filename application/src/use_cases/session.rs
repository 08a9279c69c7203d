//! Session controller
//!
//! Top-level coordinator for one committee: owns the single subscription to
//! the committee document, derives statistics and the ranked agenda from
//! each snapshot, exposes typed setters for the mutable fields, and pushes
//! presentation snapshots through the projection port.
//!
//! The chair identity is explicit context injected at construction and
//! threaded into the procedural record — there is no process-global
//! "current user" anywhere in the system.

use crate::config::SessionDefaults;
use crate::ports::document_store::{ConnectionState, DocumentStore, encode};
use crate::ports::event_log::{SessionEvent, SessionEventLog};
use crate::ports::projection::ProjectionSink;
use gavel_domain::{
    CaucusState, CaucusStatus, CommitteeState, CommitteeStats, DomainError, MemberRecord,
    MotionData, MotionType, PresentationSnapshot, ResolutionData, TimerState, rank,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Coordinator for one committee session
pub struct SessionController {
    store: Arc<dyn DocumentStore>,
    /// Path of the committee document (`committees/{id}`)
    path: String,
    /// Identity of the chair driving this view
    chair: String,
    defaults: SessionDefaults,
    projection: Arc<dyn ProjectionSink>,
    event_log: Arc<dyn SessionEventLog>,
    latest: watch::Receiver<Option<CommitteeState>>,
    cancel: CancellationToken,
}

impl SessionController {
    /// Subscribe to `committees/{committee_id}` and start mirroring it
    pub async fn start(
        store: Arc<dyn DocumentStore>,
        committee_id: &str,
        chair: impl Into<String>,
        defaults: SessionDefaults,
        projection: Arc<dyn ProjectionSink>,
        event_log: Arc<dyn SessionEventLog>,
    ) -> Self {
        let path = format!("committees/{}", committee_id);
        let cancel = CancellationToken::new();
        let (tx, latest) = watch::channel(None);

        let mut subscription = store.subscribe(&path).await;
        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        snapshot = subscription.next_as::<CommitteeState>() => match snapshot {
                            Some(state) => {
                                let _ = tx.send(state);
                            }
                            None => break,
                        },
                    }
                }
            });
        }

        info!("Session controller attached to {}", path);
        Self {
            store,
            path,
            chair: chair.into(),
            defaults,
            projection,
            event_log,
            latest,
            cancel,
        }
    }

    /// Last-known committee replica
    pub fn current(&self) -> Option<CommitteeState> {
        self.latest.borrow().clone()
    }

    /// Observe committee updates (for render loops)
    pub fn watch(&self) -> watch::Receiver<Option<CommitteeState>> {
        self.latest.clone()
    }

    /// Store connection state, for the degraded "connecting" indicator
    pub fn connection(&self) -> watch::Receiver<ConnectionState> {
        self.store.connection()
    }

    /// Voting thresholds derived from the current roll
    pub fn stats(&self) -> CommitteeStats {
        match self.current() {
            Some(committee) => CommitteeStats::derive(committee.members.values()),
            None => CommitteeStats::default(),
        }
    }

    /// The agenda: pending motions in final visible order
    pub fn ranked_motions(&self) -> Vec<(String, MotionData)> {
        let Some(committee) = self.current() else {
            return Vec::new();
        };
        rank(&committee.motions)
            .into_iter()
            .filter_map(|key| {
                let motion = committee.motions.get(&key).cloned()?;
                Some((key, motion))
            })
            .collect()
    }

    // ---- Membership ----

    /// Seat a new member on the roll
    pub fn add_member(&self, member: MemberRecord) -> Result<String, DomainError> {
        if member.name.trim().is_empty() {
            return Err(DomainError::EmptyField("name"));
        }
        let key = self
            .store
            .push(&format!("{}/members", self.path), encode(&member));
        self.event_log
            .record(SessionEvent::member_added(&key, &member));
        Ok(key)
    }

    pub fn remove_member(&self, key: &str) {
        self.store.remove(&format!("{}/members/{}", self.path, key));
    }

    /// Typed setter: presence flag of one member
    pub fn set_member_present(&self, key: &str, present: bool) {
        self.store.write(
            &format!("{}/members/{}/present", self.path, key),
            Value::Bool(present),
        );
    }

    /// Typed setter: voting flag of one member
    pub fn set_member_voting(&self, key: &str, voting: bool) {
        self.store.write(
            &format!("{}/members/{}/voting", self.path, key),
            Value::Bool(voting),
        );
    }

    // ---- Caucuses ----

    /// Open a new moderated caucus
    pub fn open_caucus(
        &self,
        topic: &str,
        caucus_seconds: i64,
        speaker_seconds: i64,
    ) -> Result<String, DomainError> {
        if topic.trim().is_empty() {
            return Err(DomainError::EmptyField("topic"));
        }
        let caucus = CaucusState::open(topic, caucus_seconds, speaker_seconds);
        let key = self
            .store
            .push(&format!("{}/caucuses", self.path), encode(&caucus));
        self.event_log
            .record(SessionEvent::caucus_opened(&key, topic));
        Ok(key)
    }

    /// Typed setter: topic of one caucus
    pub fn set_caucus_topic(&self, key: &str, topic: &str) -> Result<(), DomainError> {
        if topic.trim().is_empty() {
            return Err(DomainError::EmptyField("topic"));
        }
        self.store.write(
            &format!("{}/caucuses/{}/topic", self.path, key),
            Value::String(topic.to_string()),
        );
        Ok(())
    }

    /// Typed setter: open/closed status of one caucus
    pub fn set_caucus_status(&self, key: &str, status: CaucusStatus) {
        self.store.write(
            &format!("{}/caucuses/{}/status", self.path, key),
            encode(&status),
        );
    }

    // ---- Motions ----

    /// Carry out a pending motion and strike it from the agenda.
    ///
    /// Caucus motions materialize their caucus or timer before removal;
    /// debate-management motions only enter the procedural record. Refused
    /// when the type requires a seconder that has not been given.
    pub fn approve_motion(&self, key: &str) -> Result<(), DomainError> {
        let committee = self
            .current()
            .ok_or_else(|| DomainError::UnknownMotion(key.to_string()))?;
        let motion = committee
            .motions
            .get(key)
            .ok_or_else(|| DomainError::UnknownMotion(key.to_string()))?
            .clone();

        if motion.kind.has_seconder() && motion.seconder.is_none() {
            return Err(DomainError::EmptyField("seconder"));
        }

        match motion.kind {
            MotionType::OpenModeratedCaucus => {
                let caucus = CaucusState::open(
                    &motion.proposal,
                    i64::from(motion.effective_caucus_seconds()),
                    i64::from(motion.effective_speaker_seconds()),
                );
                let caucus_key = self
                    .store
                    .push(&format!("{}/caucuses", self.path), encode(&caucus));
                self.event_log
                    .record(SessionEvent::caucus_opened(&caucus_key, &motion.proposal));
            }
            MotionType::OpenUnmoderatedCaucus | MotionType::ExtendUnmoderatedCaucus => {
                let timer = TimerState::stopped(i64::from(motion.effective_caucus_seconds()));
                self.store
                    .write(&format!("{}/timer", self.path), encode(&timer));
            }
            MotionType::ExtendModeratedCaucus => {
                if let Some(caucus_key) = committee.caucuses.keys().last() {
                    let timer =
                        TimerState::stopped(i64::from(motion.effective_caucus_seconds()));
                    self.store.write(
                        &format!("{}/caucuses/{}/caucus_timer", self.path, caucus_key),
                        encode(&timer),
                    );
                }
            }
            MotionType::CloseModeratedCaucus => {
                if let Some(caucus_key) = committee.caucuses.keys().last() {
                    self.set_caucus_status(caucus_key, CaucusStatus::Closed);
                }
            }
            // Everything else only enters the procedural record
            _ => {}
        }

        self.store.remove(&format!("{}/motions/{}", self.path, key));
        self.event_log
            .record(SessionEvent::motion_approved(key, &motion, &self.chair));
        Ok(())
    }

    // ---- Projection ----

    /// Clear the projector
    pub fn project_idle(&self) {
        self.projection.project(PresentationSnapshot::Idle);
    }

    /// Project the committee's unmoderated countdown
    pub fn project_unmod(&self) {
        if let Some(committee) = self.current() {
            self.projection
                .project(PresentationSnapshot::Unmod(committee.timer));
        }
    }

    /// Project one moderated caucus
    pub fn project_caucus(&self, key: &str) {
        if let Some(committee) = self.current()
            && let Some(caucus) = committee.caucuses.get(key)
        {
            self.projection
                .project(PresentationSnapshot::Mod(caucus.clone()));
        }
    }

    /// Project a draft resolution
    pub fn project_resolution(&self, resolution: ResolutionData) {
        self.projection
            .project(PresentationSnapshot::Res(resolution));
    }

    /// Default durations this session runs with
    pub fn defaults(&self) -> SessionDefaults {
        self.defaults
    }

    /// Identity of the chair driving this view
    pub fn chair(&self) -> &str {
        &self.chair
    }

    /// Path of the committee document this controller mirrors
    pub fn path(&self) -> &str {
        &self.path
    }

    /// End the replica task and release the subscription
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::event_log::NoSessionEventLog;
    use crate::ports::projection::NoProjection;
    use crate::use_cases::test_support::{MockStore, settle};
    use gavel_domain::{MemberRank, TimeUnit};
    use std::sync::Mutex;

    const PATH: &str = "committees/ga";

    struct CaptureSink(Mutex<Vec<PresentationSnapshot>>);

    impl CaptureSink {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Vec::new())))
        }

        fn snapshots(&self) -> Vec<PresentationSnapshot> {
            self.0.lock().unwrap().clone()
        }
    }

    impl ProjectionSink for CaptureSink {
        fn project(&self, snapshot: PresentationSnapshot) {
            self.0.lock().unwrap().push(snapshot);
        }
    }

    async fn controller_with(
        store: &Arc<MockStore>,
        committee: &CommitteeState,
        projection: Arc<dyn ProjectionSink>,
    ) -> SessionController {
        store.write(PATH, encode(committee));
        let controller = SessionController::start(
            store.clone(),
            "ga",
            "Chair",
            SessionDefaults::default(),
            projection,
            Arc::new(NoSessionEventLog),
        )
        .await;
        settle().await;
        controller
    }

    fn committee_with_members() -> CommitteeState {
        let mut committee = CommitteeState::new("General Assembly", "Chair");
        committee
            .members
            .insert("-M0".into(), MemberRecord::new("France"));
        committee
            .members
            .insert("-M1".into(), MemberRecord::new("Ghana"));
        let mut observer = MemberRecord::observer("Red Cross");
        observer.rank = MemberRank::NGO;
        committee.members.insert("-M2".into(), observer);
        committee
    }

    #[tokio::test]
    async fn test_stats_calibration() {
        let store = MockStore::new();
        let controller =
            controller_with(&store, &committee_with_members(), Arc::new(NoProjection)).await;

        let stats = controller.stats();
        assert_eq!(stats.voting, 2);
        assert_eq!(stats.quorum, 1);
        assert_eq!(stats.draft_resolution_threshold, 1);
        assert_eq!(stats.amendment_threshold, 1);
    }

    #[tokio::test]
    async fn test_typed_setters_target_exact_fields() {
        let store = MockStore::new();
        let controller =
            controller_with(&store, &committee_with_members(), Arc::new(NoProjection)).await;

        controller.set_member_present("-M0", false);
        controller.set_member_voting("-M1", false);

        let writes = store.writes();
        let tail: Vec<(String, Value)> = writes[writes.len() - 2..].to_vec();
        assert_eq!(
            tail[0],
            (format!("{}/members/-M0/present", PATH), Value::Bool(false))
        );
        assert_eq!(
            tail[1],
            (format!("{}/members/-M1/voting", PATH), Value::Bool(false))
        );
    }

    #[tokio::test]
    async fn test_add_member_requires_name() {
        let store = MockStore::new();
        let controller =
            controller_with(&store, &CommitteeState::default(), Arc::new(NoProjection)).await;
        let writes_before = store.writes().len();

        assert_eq!(
            controller.add_member(MemberRecord::new("")),
            Err(DomainError::EmptyField("name"))
        );
        assert_eq!(store.writes().len(), writes_before);

        let key = controller.add_member(MemberRecord::new("Chile")).unwrap();
        let (path, _) = store.last_write().unwrap();
        assert_eq!(path, format!("{}/members/{}", PATH, key));
    }

    #[tokio::test]
    async fn test_approve_moderated_caucus_motion() {
        let store = MockStore::new();
        let mut committee = committee_with_members();
        let mut motion = MotionData::new(MotionType::OpenModeratedCaucus, "Brazil")
            .with_proposal("Food security")
            .with_caucus_duration(10, TimeUnit::Minutes)
            .with_speaker_duration(45, TimeUnit::Seconds);
        motion.seconder = Some("Kenya".into());
        committee.motions.insert("-K0".into(), motion);

        let controller = controller_with(&store, &committee, Arc::new(NoProjection)).await;
        controller.approve_motion("-K0").unwrap();

        // A caucus materialized with the motion's durations
        let caucus_write = store
            .writes()
            .into_iter()
            .find(|(path, _)| path.starts_with(&format!("{}/caucuses/", PATH)))
            .unwrap();
        let caucus: CaucusState = serde_json::from_value(caucus_write.1).unwrap();
        assert_eq!(caucus.topic, "Food security");
        assert_eq!(caucus.caucus_timer.remaining, 600);
        assert_eq!(caucus.speaker_timer.remaining, 45);

        // The motion left the agenda
        assert_eq!(store.removals(), vec![format!("{}/motions/-K0", PATH)]);
    }

    #[tokio::test]
    async fn test_approve_refused_without_seconder() {
        let store = MockStore::new();
        let mut committee = committee_with_members();
        committee.motions.insert(
            "-K0".into(),
            MotionData::new(MotionType::OpenModeratedCaucus, "Brazil")
                .with_proposal("Food security"),
        );

        let controller = controller_with(&store, &committee, Arc::new(NoProjection)).await;
        assert_eq!(
            controller.approve_motion("-K0"),
            Err(DomainError::EmptyField("seconder"))
        );
        assert!(store.removals().is_empty());
    }

    #[tokio::test]
    async fn test_approve_unmoderated_motion_resets_committee_timer() {
        let store = MockStore::new();
        let mut committee = committee_with_members();
        let mut motion = MotionData::new(MotionType::OpenUnmoderatedCaucus, "Brazil")
            .with_caucus_duration(20, TimeUnit::Minutes);
        motion.seconder = Some("Kenya".into());
        committee.motions.insert("-K0".into(), motion);

        let controller = controller_with(&store, &committee, Arc::new(NoProjection)).await;
        controller.approve_motion("-K0").unwrap();

        let timer_write = store
            .writes()
            .into_iter()
            .find(|(path, _)| path == &format!("{}/timer", PATH))
            .unwrap();
        let timer: TimerState = serde_json::from_value(timer_write.1).unwrap();
        assert_eq!(timer.remaining, 1200);
        assert!(!timer.ticking);
    }

    #[tokio::test]
    async fn test_approve_close_moderated_closes_latest_caucus() {
        let store = MockStore::new();
        let mut committee = committee_with_members();
        committee
            .caucuses
            .insert("-C0".into(), CaucusState::open("Old topic", 600, 60));
        committee
            .caucuses
            .insert("-C1".into(), CaucusState::open("Live topic", 600, 60));
        let mut motion = MotionData::new(MotionType::CloseModeratedCaucus, "Brazil");
        motion.seconder = Some("Kenya".into());
        committee.motions.insert("-K0".into(), motion);

        let controller = controller_with(&store, &committee, Arc::new(NoProjection)).await;
        controller.approve_motion("-K0").unwrap();

        let status_write = store
            .writes()
            .into_iter()
            .find(|(path, _)| path == &format!("{}/caucuses/-C1/status", PATH))
            .unwrap();
        assert_eq!(status_write.1, serde_json::json!("Closed"));
    }

    #[tokio::test]
    async fn test_approve_unknown_motion() {
        let store = MockStore::new();
        let controller =
            controller_with(&store, &committee_with_members(), Arc::new(NoProjection)).await;

        assert_eq!(
            controller.approve_motion("-K9"),
            Err(DomainError::UnknownMotion("-K9".to_string()))
        );
    }

    #[tokio::test]
    async fn test_ranked_motions_from_replica() {
        let store = MockStore::new();
        let mut committee = committee_with_members();
        committee.motions.insert(
            "-K0".into(),
            MotionData::new(MotionType::OpenModeratedCaucus, "Brazil").with_proposal("A"),
        );
        committee.motions.insert(
            "-K1".into(),
            MotionData::new(MotionType::ExtendUnmoderatedCaucus, "Kenya"),
        );

        let controller = controller_with(&store, &committee, Arc::new(NoProjection)).await;
        let keys: Vec<String> = controller
            .ranked_motions()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["-K1", "-K0"]);
    }

    #[tokio::test]
    async fn test_projection_snapshots() {
        let store = MockStore::new();
        let sink = CaptureSink::new();
        let mut committee = committee_with_members();
        committee
            .caucuses
            .insert("-C0".into(), CaucusState::open("Live topic", 600, 60));

        let controller = controller_with(&store, &committee, sink.clone()).await;
        controller.project_idle();
        controller.project_unmod();
        controller.project_caucus("-C0");

        let snapshots = sink.snapshots();
        assert_eq!(snapshots.len(), 3);
        assert!(snapshots[0].is_idle());
        assert_eq!(snapshots[1].label(), "unmod");
        match &snapshots[2] {
            PresentationSnapshot::Mod(caucus) => assert_eq!(caucus.topic, "Live topic"),
            other => panic!("expected mod snapshot, got {}", other.label()),
        }
    }
}
