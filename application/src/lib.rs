//! Application layer for gavel
//!
//! This crate contains port definitions and the session use cases that
//! coordinate shared procedural state. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionDefaults;
pub use ports::{
    document_store::{ConnectionState, DocumentStore, StoreError, Subscription, encode},
    event_log::{NoSessionEventLog, SessionEvent, SessionEventLog},
    notifier::{FailureNotifier, NoFailureNotifier, Notice},
    projection::{NoProjection, ProjectionSink},
};
pub use use_cases::{
    motions::MotionService, session::SessionController, speaker_queue::SpeakerQueueManager,
    timer_engine::TimerEngine,
};
