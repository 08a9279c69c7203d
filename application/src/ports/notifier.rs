//! Failure notification side-channel port
//!
//! Store writes are fire-and-forget, so access-control rejections cannot be
//! returned at the call site. Adapters route them here instead: a globally
//! observable notice the UI layer deduplicates and lets the user dismiss.

/// One user-visible failure notice.
///
/// Identity for deduplication is the full header + message pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Notice {
    pub header: String,
    pub message: String,
}

impl Notice {
    pub fn new(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            message: message.into(),
        }
    }

    /// Notice for a write rejected by the store's access rules
    pub fn permission_denied(path: &str) -> Self {
        Self::new(
            "Permission denied",
            format!("The store rejected a write to {}", path),
        )
    }
}

/// Port for surfacing asynchronous store failures.
///
/// `notify` is synchronous and non-fallible: it must never disrupt the
/// write path that triggered it.
pub trait FailureNotifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// No-op implementation for tests and headless runs
pub struct NoFailureNotifier;

impl FailureNotifier for NoFailureNotifier {
    fn notify(&self, _notice: Notice) {}
}
