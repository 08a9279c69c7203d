//! Ports (interfaces) for infrastructure and presentation adapters

pub mod document_store;
pub mod event_log;
pub mod notifier;
pub mod projection;
