//! Notifications
//!
//! Transient, auto-dismissing messages raised by every mutating storefront operation.

use std::{
    collections::VecDeque,
    fmt::{self, Debug},
    sync::{Mutex, MutexGuard, PoisonError},
};

use jiff::{SignedDuration, Timestamp};
use serde::Serialize;
use tracing::debug;

/// How long a notification stays visible unless configured otherwise.
pub const DEFAULT_DURATION: SignedDuration = SignedDuration::from_secs(3);

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something the user asked for happened.
    Success,

    /// Neutral information, e.g. an item was removed.
    Info,

    /// An operation failed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        })
    }
}

/// Notification identifier, unique within a [`NotificationCenter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

/// A raised notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    message: String,
    severity: Severity,
    duration: SignedDuration,
    raised_at: Timestamp,
}

impl Notification {
    /// Identifier of this notification.
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// When this notification was raised.
    pub fn raised_at(&self) -> Timestamp {
        self.raised_at
    }

    /// Whether the notification has outlived its display duration at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.duration_since(self.raised_at) >= self.duration
    }
}

/// Sink for fire-and-forget notifications.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Debug + Send + Sync {
    /// Raise a notification. Never fails.
    fn notify(&self, severity: Severity, message: &str);
}

#[derive(Debug, Default)]
struct Queue {
    next_id: u64,
    entries: VecDeque<Notification>,
}

/// Queue of live notifications with auto-expiry.
#[derive(Debug)]
pub struct NotificationCenter {
    duration: SignedDuration,
    queue: Mutex<Queue>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_duration(DEFAULT_DURATION)
    }
}

impl NotificationCenter {
    /// Create a centre using [`DEFAULT_DURATION`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a centre whose notifications expire after `duration`.
    pub fn with_duration(duration: SignedDuration) -> Self {
        Self {
            duration,
            queue: Mutex::new(Queue::default()),
        }
    }

    fn queue(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Raise a notification stamped with `raised_at`.
    pub fn raise_at(
        &self,
        severity: Severity,
        message: impl Into<String>,
        raised_at: Timestamp,
    ) -> NotificationId {
        let mut queue = self.queue();

        let id = NotificationId(queue.next_id);
        queue.next_id += 1;

        let notification = Notification {
            id,
            message: message.into(),
            severity,
            duration: self.duration,
            raised_at,
        };

        debug!(%severity, message = %notification.message, "notification raised");

        queue.entries.push_back(notification);

        id
    }

    /// Notifications still visible at `now`, oldest first.
    pub fn active(&self, now: Timestamp) -> Vec<Notification> {
        self.queue()
            .entries
            .iter()
            .filter(|notification| !notification.is_expired(now))
            .cloned()
            .collect()
    }

    /// Drop expired notifications, returning how many were removed.
    pub fn prune(&self, now: Timestamp) -> usize {
        let mut queue = self.queue();
        let before = queue.entries.len();

        queue.entries.retain(|notification| !notification.is_expired(now));

        before - queue.entries.len()
    }

    /// Dismiss a notification early. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut queue = self.queue();
        let before = queue.entries.len();

        queue.entries.retain(|notification| notification.id != id);

        queue.entries.len() != before
    }

    /// Remove and return every queued notification.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue().entries.drain(..).collect()
    }

    /// Messages currently queued, regardless of expiry.
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.queue()
            .entries
            .iter()
            .map(|notification| (notification.severity, notification.message.clone()))
            .collect()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, severity: Severity, message: &str) {
        self.raise_at(severity, message, Timestamp::now());
    }
}
