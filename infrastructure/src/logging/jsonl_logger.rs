//! JSONL file writer for the procedural record.
//!
//! Each [`SessionEvent`] becomes one JSON line carrying a `type` tag, a
//! UTC timestamp, and the event's own fields. Write failures degrade to a
//! tracing warning; they never disrupt the session.

use gavel_application::ports::event_log::{SessionEvent, SessionEventLog};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Session event log writing one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`, flushed after every record —
/// the procedural record is exactly what must survive a crash mid-session.
pub struct JsonlSessionLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlSessionLog {
    /// Open a log at `path`, creating parent directories as needed.
    ///
    /// Opens in append mode: rejoining a session the same day extends its
    /// record instead of erasing it. Returns `None` when the file cannot
    /// be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| {
                    warn!(
                        "Could not create session log directory {}: {}",
                        parent.display(),
                        e
                    );
                })
                .ok()?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                warn!("Could not open session log file {}: {}", path.display(), e);
            })
            .ok()?;

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    /// Open the log for `committee` under `dir`, named by session date
    pub fn for_committee(dir: &Path, committee: &str) -> Option<Self> {
        let date = chrono::Utc::now().format("%Y-%m-%d");
        Self::new(dir.join(format!("{}-{}.events.jsonl", committee, date)))
    }

    /// Get the path to the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionEventLog for JsonlSessionLog {
    fn record(&self, event: SessionEvent) {
        let stamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Envelope first, then the event's own fields alongside it
        let mut record = Map::new();
        record.insert("type".into(), event.event_type.into());
        record.insert("timestamp".into(), stamp.into());
        match event.payload {
            Value::Object(fields) => record.extend(fields),
            other => {
                record.insert("data".into(), other);
            }
        }

        let Ok(line) = serde_json::to_string(&Value::Object(record)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlSessionLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
