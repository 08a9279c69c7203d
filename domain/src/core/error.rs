//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every variant here is a local validation failure: the caller refuses the
/// operation and leaves prior state untouched. None of these propagate to
/// the shared store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Duration must be a positive number, got {0}")]
    InvalidDuration(i64),

    #[error("Timer is running; stop it before changing the duration")]
    TimerRunning,

    #[error("Speaker queue is empty")]
    EmptyQueue,

    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),

    #[error("Caucus is closed")]
    CaucusClosed,

    #[error("No pending motion under key {0}")]
    UnknownMotion(String),
}

impl DomainError {
    /// Check whether this error should be surfaced to the user at all.
    ///
    /// Validation failures on user input are silently refused per the
    /// error-handling design; an empty speaker queue is worth a hint.
    pub fn is_silent(&self) -> bool {
        !matches!(self, DomainError::EmptyQueue)
    }
}
