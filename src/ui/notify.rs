//! Transient notifications (toasts)

use std::collections::VecDeque;
use std::sync::Mutex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn, error};
use super::lock;

/// Toast flavour, mirrors the icon/colour the page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToastKind::Success => write!(f, "success"),
            ToastKind::Error => write!(f, "error"),
            ToastKind::Warning => write!(f, "warning"),
            ToastKind::Info => write!(f, "info"),
        }
    }
}

/// A notification shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Surface for transient user notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: ToastKind, message: &str);

    fn success(&self, message: &str) {
        self.notify(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(ToastKind::Error, message);
    }

    fn warning(&self, message: &str) {
        self.notify(ToastKind::Warning, message);
    }

    fn info(&self, message: &str) {
        self.notify(ToastKind::Info, message);
    }
}

/// Notifier that drops every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _kind: ToastKind, _message: &str) {}
}

/// In-memory toast queue.
///
/// Keeps the most recent `capacity` toasts and mirrors each one to the log.
#[derive(Debug)]
pub struct ToastManager {
    toasts: Mutex<VecDeque<Toast>>,
    capacity: usize,
}

impl ToastManager {
    pub const DEFAULT_CAPACITY: usize = 50;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            toasts: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    /// Snapshot of the queued toasts, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        lock(&self.toasts).iter().cloned().collect()
    }

    /// Remove and return all queued toasts
    pub fn drain(&self) -> Vec<Toast> {
        lock(&self.toasts).drain(..).collect()
    }

    pub fn last(&self) -> Option<Toast> {
        lock(&self.toasts).back().cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.toasts).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastManager {
    fn notify(&self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Error => error!(kind = %kind, message = message, "Toast shown"),
            ToastKind::Warning => warn!(kind = %kind, message = message, "Toast shown"),
            _ => info!(kind = %kind, message = message, "Toast shown"),
        }

        let mut toasts = lock(&self.toasts);
        if toasts.len() == self.capacity {
            toasts.pop_front();
        }
        toasts.push_back(Toast {
            kind,
            message: message.to_string(),
            created_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_manager_records_in_order() {
        let toasts = ToastManager::new();
        toasts.success("saved");
        toasts.error("boom");

        let recorded = toasts.toasts();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].kind, ToastKind::Success);
        assert_eq!(recorded[1].message, "boom");
        assert_eq!(toasts.last().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn test_toast_manager_drops_oldest_at_capacity() {
        let toasts = ToastManager::with_capacity(2);
        toasts.info("one");
        toasts.info("two");
        toasts.warning("three");

        let messages: Vec<String> = toasts.drain().into_iter().map(|t| t.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert!(toasts.is_empty());
    }
}
