//! Presentation layer for gavel
//!
//! This crate contains the presentation bridge (primary view → secondary
//! projector window), console output formatting, and CLI definitions.

pub mod bridge;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use bridge::{PresentationBridge, PresentationWindow};
pub use cli::commands::Cli;
pub use output::{console::ConsoleFormatter, gauge::TimerGauge};
