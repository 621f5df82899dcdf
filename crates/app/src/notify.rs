//! Transient user notifications
//!
//! Notices are queued by view models and drained by the shell.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// How long a notice stays on screen
pub const NOTICE_DURATION: Duration = Duration::from_millis(2000);

/// A short message with a dismiss action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub action: &'static str,
    pub duration: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: "OK",
            duration: NOTICE_DURATION,
        }
    }
}

#[derive(Default)]
pub struct Notifier {
    queue: Mutex<Vec<Notice>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&self, message: impl Into<String>) {
        let notice = Notice::new(message);
        tracing::info!(
            notice = %notice.message,
            duration_ms = notice.duration.as_millis() as u64,
            "Notice"
        );
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }

    /// Take all pending notices
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Messages of pending notices, oldest first
    #[cfg(test)]
    pub fn messages(&self) -> Vec<String> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}
