//! Deduplicating notification center
//!
//! Collects the asynchronous failure notices the store emits (permission
//! rejections, primarily). Identical header + message pairs collapse to one
//! visible notice; each notice is individually dismissible.

use gavel_application::ports::notifier::{FailureNotifier, Notice};
use std::sync::Mutex;
use tracing::warn;

/// Global sink for asynchronous store failures
#[derive(Default)]
pub struct NotificationCenter {
    notices: Mutex<Vec<Notice>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently visible notices, oldest first
    pub fn active(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(notices) => notices.clone(),
            Err(_) => Vec::new(),
        }
    }

    /// Dismiss one notice. Returns whether it was present.
    pub fn dismiss(&self, notice: &Notice) -> bool {
        let Ok(mut notices) = self.notices.lock() else {
            return false;
        };
        let before = notices.len();
        notices.retain(|n| n != notice);
        notices.len() < before
    }

    pub fn clear(&self) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.clear();
        }
    }
}

impl FailureNotifier for NotificationCenter {
    fn notify(&self, notice: Notice) {
        let Ok(mut notices) = self.notices.lock() else {
            return;
        };
        if notices.contains(&notice) {
            return;
        }
        warn!("{}: {}", notice.header, notice.message);
        notices.push(notice);
    }
}
