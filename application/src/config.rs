//! Application-level session defaults

use gavel_domain::{TimeUnit, TimerState};
use serde::{Deserialize, Serialize};

/// Durations applied where the user has not chosen one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    /// Speaking time granted to each speaker, in seconds
    pub speech_seconds: u32,
    /// Caucus length granted to new caucuses, in minutes
    pub caucus_minutes: u32,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            speech_seconds: 60,
            caucus_minutes: 10,
        }
    }
}

impl SessionDefaults {
    /// Fresh stopped speaker timer at the default speech length
    pub fn speaker_timer(&self) -> TimerState {
        TimerState::stopped(i64::from(self.speech_seconds))
    }

    /// Fresh stopped caucus timer at the default caucus length
    pub fn caucus_timer(&self) -> TimerState {
        TimerState::stopped(i64::from(TimeUnit::Minutes.to_seconds(self.caucus_minutes)))
    }
}
