//! Caucus domain entities

use crate::timer::entities::TimerState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Position a speaker takes on the topic under debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Stance {
    For,
    #[default]
    Neutral,
    Against,
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stance::For => write!(f, "For"),
            Stance::Neutral => write!(f, "Neutral"),
            Stance::Against => write!(f, "Against"),
        }
    }
}

/// One speaking slot (Entity)
///
/// Immutable once created; identified by the store key it was pushed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerEvent {
    /// Member taking the floor
    pub who: String,
    /// Stance tag shown alongside the speaker
    #[serde(default)]
    pub stance: Stance,
    /// Allotted speaking time in seconds
    pub duration: u32,
}

impl SpeakerEvent {
    pub fn new(who: impl Into<String>, stance: Stance, duration: u32) -> Self {
        Self {
            who: who.into(),
            stance,
            duration,
        }
    }
}

/// Whether the caucus still accepts speakers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CaucusStatus {
    #[default]
    Open,
    Closed,
}

/// Full state of one moderated caucus (Entity)
///
/// Replicated to every connected viewer through the document store. The
/// queue and history maps are keyed by store push keys, whose natural
/// string order is insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CaucusState {
    pub topic: String,
    pub status: CaucusStatus,
    /// Clock for the caucus as a whole
    pub caucus_timer: TimerState,
    /// Clock for the member currently on the floor
    pub speaker_timer: TimerState,
    /// At most one member holds the floor
    pub speaking: Option<SpeakerEvent>,
    /// Pending speakers in insertion order
    pub queue: BTreeMap<String, SpeakerEvent>,
    /// Finished speakers
    pub history: BTreeMap<String, SpeakerEvent>,
}

impl CaucusState {
    /// Create an open caucus on `topic` with the given timer durations
    pub fn open(topic: impl Into<String>, caucus_seconds: i64, speaker_seconds: i64) -> Self {
        Self {
            topic: topic.into(),
            status: CaucusStatus::Open,
            caucus_timer: TimerState::stopped(caucus_seconds),
            speaker_timer: TimerState::stopped(speaker_seconds),
            ..Self::default()
        }
    }

    /// Key of the oldest queued speaker, if any
    pub fn next_in_queue(&self) -> Option<&String> {
        self.queue.keys().next()
    }

    pub fn is_closed(&self) -> bool {
        self.status == CaucusStatus::Closed
    }
}
