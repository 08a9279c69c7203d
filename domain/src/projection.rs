//! Snapshots carried over the presentation channel
//!
//! The primary (chair) view broadcasts one of these whenever the projected
//! display should change. Exactly one variant is current per channel;
//! switching variants discards the previous payload from the display, not
//! from the store.

use crate::caucus::entities::CaucusState;
use crate::timer::entities::TimerState;
use serde::{Deserialize, Serialize};

/// What the secondary display is currently showing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PresentationSnapshot {
    /// Nothing projected; the state a window starts in before the first
    /// event arrives
    #[default]
    Idle,
    /// Unmoderated caucus countdown
    Unmod(TimerState),
    /// Moderated caucus: current speaker, queue, both clocks
    Mod(CaucusState),
    /// A draft resolution up on the projector
    Res(ResolutionData),
}

impl PresentationSnapshot {
    pub fn is_idle(&self) -> bool {
        matches!(self, PresentationSnapshot::Idle)
    }

    /// Short tag for logs and window titles
    pub fn label(&self) -> &'static str {
        match self {
            PresentationSnapshot::Idle => "idle",
            PresentationSnapshot::Unmod(_) => "unmod",
            PresentationSnapshot::Mod(_) => "mod",
            PresentationSnapshot::Res(_) => "res",
        }
    }
}

/// Resolution details shown on the projector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResolutionData {
    pub name: String,
    pub proposer: String,
    /// Amendment currently in motion against this resolution, if any
    pub amendment: Option<String>,
}
