//! Timer state machine
//!
//! [`TimerState`] is the authoritative remote value for one countdown clock.
//! `elapsed` only grows while `ticking`; `remaining` may go negative and is
//! still displayed as overtime.

use crate::core::error::DomainError;
use crate::core::unit::TimeUnit;
use serde::{Deserialize, Serialize};

/// State of one shared countdown timer (Entity)
///
/// Two inputs drive it: the owning client's local one-second tick, and
/// remote writes from any client toggling start/stop or resetting the
/// duration. Every transition returns a new value; nothing mutates in
/// place, so replicas received from the store are never aliased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerState {
    /// Seconds counted up since the timer last started from zero
    pub elapsed: u32,
    /// Seconds left; negative means overtime and is still displayed
    pub remaining: i64,
    /// Whether any client should be advancing this timer
    pub ticking: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            elapsed: 0,
            remaining: 60,
            ticking: false,
        }
    }
}

impl TimerState {
    /// Create a stopped timer with the given number of seconds remaining
    pub fn stopped(remaining: i64) -> Self {
        Self {
            elapsed: 0,
            remaining,
            ticking: false,
        }
    }

    /// One second of progress.
    ///
    /// Callers check `ticking` against the freshest remote snapshot before
    /// applying this, so a reset arriving between ticks wins.
    pub fn ticked(&self) -> Self {
        Self {
            elapsed: self.elapsed + 1,
            remaining: self.remaining - 1,
            ticking: self.ticking,
        }
    }

    /// Flip start/stop, leaving elapsed and remaining untouched
    pub fn toggled(&self) -> Self {
        Self {
            ticking: !self.ticking,
            ..*self
        }
    }

    /// Reset to a fresh, stopped duration of `amount` in `unit`.
    ///
    /// Refused while ticking, and refused for non-positive amounts (the
    /// caller leaves prior state untouched in both cases).
    pub fn with_duration(&self, amount: i64, unit: TimeUnit) -> Result<Self, DomainError> {
        if self.ticking {
            return Err(DomainError::TimerRunning);
        }
        if amount <= 0 {
            return Err(DomainError::InvalidDuration(amount));
        }
        Ok(Self {
            elapsed: 0,
            remaining: amount * i64::from(unit.seconds()),
            ticking: false,
        })
    }

    /// Whether the timer has gone past zero
    pub fn in_overtime(&self) -> bool {
        self.remaining < 0
    }
}
