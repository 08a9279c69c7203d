//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section and field defaults, so a missing or partial file is fine.
//!
//! Example configuration:
//!
//! ```toml
//! [session]
//! committee = "general-assembly"
//! name = "General Assembly"
//! chair = "Director"
//!
//! [defaults]
//! speech_seconds = 90
//! caucus_minutes = 10
//!
//! [log]
//! events = true
//! ```

use gavel_application::SessionDefaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Committee identity for this session
    pub session: FileSessionConfig,
    /// Default durations
    pub defaults: FileDefaultsConfig,
    /// Session event log settings
    pub log: FileLogConfig,
}

/// `[session]` section: which committee this host serves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Committee id used in store paths
    pub committee: String,
    /// Display name of the committee
    pub name: String,
    /// Chair identity attached to approvals in the procedural record
    pub chair: String,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            committee: "general-assembly".to_string(),
            name: "General Assembly".to_string(),
            chair: "Chair".to_string(),
        }
    }
}

/// `[defaults]` section: durations applied where the user chose none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDefaultsConfig {
    pub speech_seconds: u32,
    pub caucus_minutes: u32,
}

impl Default for FileDefaultsConfig {
    fn default() -> Self {
        let defaults = SessionDefaults::default();
        Self {
            speech_seconds: defaults.speech_seconds,
            caucus_minutes: defaults.caucus_minutes,
        }
    }
}

impl FileDefaultsConfig {
    pub fn to_session_defaults(self) -> SessionDefaults {
        SessionDefaults {
            speech_seconds: self.speech_seconds,
            caucus_minutes: self.caucus_minutes,
        }
    }
}

/// `[log]` section: the JSONL procedural record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Whether to write the session event log at all
    pub events: bool,
    /// Directory override; defaults to the platform data directory
    pub dir: Option<PathBuf>,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            events: true,
            dir: None,
        }
    }
}
