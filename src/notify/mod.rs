//! Single-slot notification channel.
//!
//! Holds the most recent user-facing message. Publishing replaces whatever
//! was there (last write wins); nothing is queued. Presentation code watches
//! the slot and shows each notification for its `timeout`.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Fixed display duration used for command results.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Severity of a notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationKind {
    Error,
    Success,
    Warning,
}

/// A user-facing message with a severity and display duration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    #[serde(rename = "timeoutMs", with = "millis")]
    pub timeout: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Last-write-wins slot shared by producers and presentation code.
///
/// Clones share the slot.
#[derive(Clone)]
pub struct NotificationChannel {
    slot: Arc<watch::Sender<Option<Notification>>>,
    published: Arc<AtomicU64>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            slot: Arc::new(sender),
            published: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Replace the slot's content.
    pub fn publish(&self, notification: Notification) {
        tracing::debug!(
            kind = ?notification.kind,
            message = %notification.message,
            "publishing notification"
        );
        self.published.fetch_add(1, Ordering::SeqCst);
        self.slot.send_replace(Some(notification));
    }

    /// Most recently published notification, if any.
    pub fn latest(&self) -> Option<Notification> {
        self.slot.borrow().clone()
    }

    /// Empty the slot, e.g. once the message has been dismissed.
    pub fn clear(&self) {
        self.slot.send_replace(None);
    }

    /// Watch the slot for changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.slot.subscribe()
    }

    /// Number of notifications published so far.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::SeqCst)
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("latest", &self.latest())
            .field("published", &self.published())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_channel_is_empty() {
        let channel = NotificationChannel::new();
        assert_eq!(channel.latest(), None);
        assert_eq!(channel.published(), 0);
    }

    #[test]
    fn last_write_wins() {
        let channel = NotificationChannel::new();
        channel.publish(Notification::success("first"));
        channel.publish(Notification::error("second"));

        assert_eq!(channel.latest(), Some(Notification::error("second")));
        assert_eq!(channel.published(), 2);
    }

    #[test]
    fn clones_share_the_slot() {
        let channel = NotificationChannel::new();
        let producer = channel.clone();

        producer.publish(Notification::warning("careful"));

        assert_eq!(channel.latest().unwrap().kind, NotificationKind::Warning);
    }

    #[test]
    fn clear_empties_the_slot() {
        let channel = NotificationChannel::new();
        channel.publish(Notification::success("done"));
        channel.clear();

        assert_eq!(channel.latest(), None);
        assert_eq!(channel.published(), 1);
    }

    #[test]
    fn receivers_see_changes() {
        let channel = NotificationChannel::new();
        let mut receiver = channel.subscribe();

        channel.publish(Notification::success("done"));

        assert!(receiver.has_changed().unwrap());
        let seen = receiver.borrow_and_update().clone();
        assert_eq!(seen.unwrap().message, "done");
    }

    #[test]
    fn serializes_wire_shape() {
        let notification =
            Notification::error("disk full").with_timeout(Duration::from_millis(1500));

        let json = serde_json::to_value(&notification).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "kind": "ERROR", "message": "disk full", "timeoutMs": 1500 })
        );

        let back: Notification = serde_json::from_value(json).unwrap();
        assert_eq!(back, notification);
    }

    #[test]
    fn default_timeout_is_five_seconds() {
        assert_eq!(Notification::success("x").timeout, Duration::from_secs(5));
    }
}
