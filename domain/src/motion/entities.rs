//! Motion domain entities

use super::motion_type::MotionType;
use crate::core::error::DomainError;
use crate::core::unit::TimeUnit;
use serde::{Deserialize, Serialize};

/// Default caucus length attached to motions whose type carries no
/// duration; they still participate in duration tie-breaking at face value.
pub const DEFAULT_CAUCUS_MINUTES: u32 = 15;

/// Default speaking time attached to new motions
pub const DEFAULT_SPEECH_SECONDS: u32 = 60;

/// A proposed procedural action awaiting the chair (Entity)
///
/// Keyed by a store push key inside the session's unordered motion
/// collection. No order field exists on purpose; the agenda position is
/// recomputed by [`crate::motion::ranking::rank`] on every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionData {
    /// Free-text detail (topic, resolution name, strawpoll question)
    pub proposal: String,
    /// Member who moved it
    pub proposer: String,
    /// Member who seconded it, when the type requires one
    pub seconder: Option<String>,
    pub speaker_duration: u32,
    pub speaker_unit: TimeUnit,
    pub caucus_duration: u32,
    pub caucus_unit: TimeUnit,
    pub kind: MotionType,
}

impl Default for MotionData {
    fn default() -> Self {
        Self {
            proposal: String::new(),
            proposer: String::new(),
            seconder: None,
            speaker_duration: DEFAULT_SPEECH_SECONDS,
            speaker_unit: TimeUnit::Seconds,
            caucus_duration: DEFAULT_CAUCUS_MINUTES,
            caucus_unit: TimeUnit::Minutes,
            kind: MotionType::OpenModeratedCaucus,
        }
    }
}

impl MotionData {
    pub fn new(kind: MotionType, proposer: impl Into<String>) -> Self {
        Self {
            kind,
            proposer: proposer.into(),
            ..Self::default()
        }
    }

    pub fn with_proposal(mut self, proposal: impl Into<String>) -> Self {
        self.proposal = proposal.into();
        self
    }

    pub fn with_caucus_duration(mut self, amount: u32, unit: TimeUnit) -> Self {
        self.caucus_duration = amount;
        self.caucus_unit = unit;
        self
    }

    pub fn with_speaker_duration(mut self, amount: u32, unit: TimeUnit) -> Self {
        self.speaker_duration = amount;
        self.speaker_unit = unit;
        self
    }

    /// Caucus length in whole seconds, the ranking tie-break key.
    ///
    /// Taken at face value even when the type carries no duration.
    pub fn effective_caucus_seconds(&self) -> u32 {
        self.caucus_unit.to_seconds(self.caucus_duration)
    }

    /// Per-speaker length in whole seconds
    pub fn effective_speaker_seconds(&self) -> u32 {
        self.speaker_unit.to_seconds(self.speaker_duration)
    }

    /// Refuse motions missing what their type requires.
    ///
    /// Prior state stays untouched on failure; nothing is written.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.proposer.trim().is_empty() {
            return Err(DomainError::EmptyField("proposer"));
        }
        if self.kind.has_detail() && self.proposal.trim().is_empty() {
            return Err(DomainError::EmptyField("proposal"));
        }
        if self.kind.has_duration() && self.caucus_duration == 0 {
            return Err(DomainError::InvalidDuration(0));
        }
        Ok(())
    }
}
