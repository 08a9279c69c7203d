//! Access rules for store writes
//!
//! A minimal prefix-lock model: a locked prefix rejects writes at the
//! prefix and everything beneath it. Rejections never reach the caller —
//! the store routes them to the notification side-channel.

/// Write-access policy checked by store adapters before committing
#[derive(Debug, Clone, Default)]
pub struct AccessRules {
    locked: Vec<String>,
}

impl AccessRules {
    /// Everything writable
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Lock `prefix` and every path beneath it against writes
    pub fn lock_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.locked.push(prefix.into());
        self
    }

    pub fn can_write(&self, path: &str) -> bool {
        !self
            .locked
            .iter()
            .any(|prefix| path == prefix || path.starts_with(&format!("{}/", prefix)))
    }
}
