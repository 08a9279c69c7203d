//! Infrastructure layer for gavel
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the in-memory document store, the deduplicating
//! notification center, the TOML configuration loader, and the JSONL
//! session event log.

pub mod config;
pub mod logging;
pub mod notifications;
pub mod store;

// Re-export commonly used types
pub use config::{
    file_config::{FileConfig, FileDefaultsConfig, FileLogConfig, FileSessionConfig},
    loader::ConfigLoader,
};
pub use logging::jsonl_logger::JsonlSessionLog;
pub use notifications::NotificationCenter;
pub use store::{memory::MemoryDocumentStore, push_id::PushIdGenerator, rules::AccessRules};
