//! Port for structured session event logging.
//!
//! Separate from `tracing`-based operation logs: tracing carries diagnostic
//! messages, while this port captures the procedural record of the session
//! (motions moved and approved, speakers advanced) in a machine-readable
//! form (JSONL).

use gavel_domain::{CaucusState, MemberRecord, MotionData};
use serde_json::{Value, json};

/// A structured session event for the procedural record.
pub struct SessionEvent {
    /// Event type identifier (e.g., "motion_proposed", "speaker_advanced")
    pub event_type: &'static str,
    /// JSON payload with event-specific data
    pub payload: Value,
}

impl SessionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn motion_proposed(key: &str, motion: &MotionData) -> Self {
        Self::new(
            "motion_proposed",
            json!({
                "key": key,
                "kind": motion.kind,
                "proposer": motion.proposer,
                "proposal": motion.proposal,
            }),
        )
    }

    pub fn motion_approved(key: &str, motion: &MotionData, chair: &str) -> Self {
        Self::new(
            "motion_approved",
            json!({
                "key": key,
                "kind": motion.kind,
                "action": motion.kind.action_name(),
                "approved_by": chair,
            }),
        )
    }

    pub fn motion_removed(key: &str) -> Self {
        Self::new("motion_removed", json!({ "key": key }))
    }

    pub fn speaker_advanced(caucus: &CaucusState) -> Self {
        Self::new(
            "speaker_advanced",
            json!({
                "topic": caucus.topic,
                "speaking": caucus.speaking.as_ref().map(|s| s.who.clone()),
                "queued": caucus.queue.len(),
            }),
        )
    }

    pub fn member_added(key: &str, member: &MemberRecord) -> Self {
        Self::new(
            "member_added",
            json!({ "key": key, "name": member.name, "voting": member.voting }),
        )
    }

    pub fn caucus_opened(key: &str, topic: &str) -> Self {
        Self::new("caucus_opened", json!({ "key": key, "topic": topic }))
    }
}

/// Port for recording session events.
///
/// `record` is intentionally synchronous and non-fallible; logging failures
/// must never disrupt procedural flow.
pub trait SessionEventLog: Send + Sync {
    fn record(&self, event: SessionEvent);
}

/// No-op implementation for tests and when logging is disabled
pub struct NoSessionEventLog;

impl SessionEventLog for NoSessionEventLog {
    fn record(&self, _event: SessionEvent) {}
}
