//! User-visible notifications raised by the board.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The service rejected a status change; the board is being reloaded.
    MoveRejected,
    /// Loading the project's tasks failed; the cache was left as it was.
    LoadFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn move_rejected(detail: &str) -> Self {
        Self {
            kind: NoticeKind::MoveRejected,
            message: format!("Failed to move task: {}", detail),
        }
    }

    pub fn load_failed() -> Self {
        Self {
            kind: NoticeKind::LoadFailed,
            message: "Failed to load tasks".to_string(),
        }
    }
}

/// Blocking notification sink (an alert dialog in a browser front-end).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Writes notices to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        tracing::error!(kind = ?notice.kind, "{}", notice.message);
    }
}

/// Keeps every notice for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}
