//! Toast notification dispatcher
//!
//! Holds the ordered list of transient messages shown to the user. Each
//! toast with a non-zero lifetime removes itself after that delay; the user
//! may also dismiss any toast early. The renderer reads [`snapshot`] on
//! every frame.
//!
//! [`snapshot`]: NotificationDispatcher::snapshot

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

/// Default toast lifetime in milliseconds
pub const DEFAULT_DURATION_MS: u64 = 4000;

/// Notification severity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationKind {
    /// Get icon for kind
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Info => "ℹ",
            Self::Warning => "⚠",
            Self::Error => "✗",
        }
    }
}

/// A single toast
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: Option<String>,
    pub message: String,
    /// Lifetime in milliseconds, 0 means "until dismissed"
    pub auto_dismiss_ms: u64,
}

/// Ordered toast list with auto-dismiss timers
#[derive(Clone, Debug)]
pub struct NotificationDispatcher {
    notifications: Arc<Mutex<Vec<Notification>>>,
    default_duration_ms: u64,
}

impl Default for NotificationDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}

impl NotificationDispatcher {
    /// Create a dispatcher whose helpers use `default_duration_ms`
    pub fn new(default_duration_ms: u64) -> Self {
        Self {
            notifications: Arc::new(Mutex::new(Vec::new())),
            default_duration_ms,
        }
    }

    fn list(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a toast and return its id
    ///
    /// A non-zero `duration_ms` schedules removal after that delay; must be
    /// called from within a tokio runtime in that case.
    pub fn enqueue(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        title: Option<&str>,
        duration_ms: u64,
    ) -> String {
        let id = format!("notification-{}", uuid::Uuid::new_v4());
        let notification = Notification {
            id: id.clone(),
            kind,
            title: title.map(str::to_string),
            message: message.into(),
            auto_dismiss_ms: duration_ms,
        };

        tracing::debug!("Notification {:?}: {}", kind, notification.message);
        self.list().push(notification);

        if duration_ms > 0 {
            let list = Arc::downgrade(&self.notifications);
            let expired = id.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(duration_ms)).await;
                remove(&list, &expired);
            });
        }

        id
    }

    /// Remove a toast immediately; unknown ids are ignored
    pub fn dismiss(&self, id: &str) {
        self.list().retain(|n| n.id != id);
    }

    /// Remove the oldest toast, if any
    pub fn dismiss_oldest(&self) {
        let mut list = self.list();
        if !list.is_empty() {
            list.remove(0);
        }
    }

    pub fn clear(&self) {
        self.list().clear();
    }

    pub fn success(&self, message: impl Into<String>, title: Option<&str>) -> String {
        self.enqueue(NotificationKind::Success, message, title, self.default_duration_ms)
    }

    pub fn info(&self, message: impl Into<String>, title: Option<&str>) -> String {
        self.enqueue(NotificationKind::Info, message, title, self.default_duration_ms)
    }

    pub fn warning(&self, message: impl Into<String>, title: Option<&str>) -> String {
        self.enqueue(NotificationKind::Warning, message, title, self.default_duration_ms)
    }

    pub fn error(&self, message: impl Into<String>, title: Option<&str>) -> String {
        self.enqueue(NotificationKind::Error, message, title, self.default_duration_ms)
    }

    /// Current toasts, oldest first
    pub fn snapshot(&self) -> Vec<Notification> {
        self.list().clone()
    }

    /// The newest `max` toasts, oldest first
    pub fn visible(&self, max: usize) -> Vec<Notification> {
        let list = self.list();
        let skip = list.len().saturating_sub(max);
        list[skip..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

fn remove(list: &Weak<Mutex<Vec<Notification>>>, id: &str) {
    if let Some(list) = list.upgrade() {
        list.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|n| n.id != id);
    }
}
