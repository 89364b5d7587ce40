//! SimTree Notification Layer
//!
//! Toast-style notifications with auto-dismiss timers. The
//! [`NotificationCenter`] is a cheaply clonable handle over one shared
//! list; the UI reads the list, timer tasks prune it.
//!
//! # Timer semantics
//!
//! A notification with a positive duration is scheduled for removal on the
//! tokio timeline as a fire-and-forget task. Individual timers are not
//! cancelable: [`NotificationCenter::clear_all`] empties the list but lets
//! pending timers fire into the idempotent no-op of
//! [`NotificationCenter::remove`].
//!
//! Auto-dismiss therefore requires a tokio runtime; [`NotificationCenter::add`]
//! must be called from within one when a positive duration is in play.

#![warn(missing_docs)]

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Default auto-dismiss delay
pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

/// Unique identifier for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl NotificationId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Something needs attention
    Warning,
    /// Informational
    Info,
}

impl Severity {
    /// String representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A pending notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Unique identifier
    pub id: NotificationId,
    /// Short title
    pub title: String,
    /// Message body
    pub message: String,
    /// Severity
    pub severity: Severity,
    /// Resolved auto-dismiss delay; zero means the notification is sticky
    pub duration: Duration,
}

/// Shared notification list with auto-dismiss scheduling
///
/// Clones share the same underlying list, so a clone handed to a timer
/// task or another UI component observes and affects the same state.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationCenter {
    /// Create an empty notification center
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification and schedule its auto-removal
    ///
    /// `duration` defaults to [`DEFAULT_DURATION`]; pass
    /// `Some(Duration::ZERO)` for a sticky notification that only explicit
    /// removal dismisses.
    pub fn add(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        duration: Option<Duration>,
    ) -> NotificationId {
        let id = NotificationId::new();
        let duration = duration.unwrap_or(DEFAULT_DURATION);

        self.inner.lock().unwrap().push(Notification {
            id,
            title: title.into(),
            message: message.into(),
            severity,
            duration,
        });

        if !duration.is_zero() {
            let center = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                tracing::debug!(%id, "auto-dismissing notification");
                center.remove(id);
            });
        }

        id
    }

    /// Remove a notification; no-op if it is already gone
    pub fn remove(&self, id: NotificationId) {
        self.inner.lock().unwrap().retain(|n| n.id != id);
    }

    /// Discard every pending notification immediately
    ///
    /// Already-scheduled auto-removal timers keep running; when they fire
    /// they hit the idempotent no-op path of [`remove`](Self::remove).
    pub fn clear_all(&self) {
        self.inner.lock().unwrap().clear();
    }

    /// Snapshot of the current notifications, in insertion order
    pub fn all(&self) -> Vec<Notification> {
        self.inner.lock().unwrap().clone()
    }

    /// Number of pending notifications
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// True if no notifications are pending
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }

    /// Add a success notification
    pub fn success(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> NotificationId {
        self.add(title, message, Severity::Success, duration)
    }

    /// Add an error notification
    pub fn error(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> NotificationId {
        self.add(title, message, Severity::Error, duration)
    }

    /// Add a warning notification
    pub fn warning(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> NotificationId {
        self.add(title, message, Severity::Warning, duration)
    }

    /// Add an info notification
    pub fn info(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> NotificationId {
        self.add(title, message, Severity::Info, duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_after_duration() {
        let center = NotificationCenter::new();
        let id = center.add(
            "Saved",
            "Family tree saved",
            Severity::Success,
            Some(Duration::from_secs(1)),
        );

        assert_eq!(center.len(), 1);
        assert_eq!(center.all()[0].id, id);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(center.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_duration_is_five_seconds() {
        let center = NotificationCenter::new();
        center.add("Hi", "there", Severity::Info, None);

        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert_eq!(center.len(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(center.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_is_sticky() {
        let center = NotificationCenter::new();
        center.add("Stuck", "around", Severity::Warning, Some(Duration::ZERO));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(center.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_is_idempotent() {
        let center = NotificationCenter::new();
        let id = center.add("Once", "only", Severity::Info, Some(Duration::ZERO));

        center.remove(id);
        center.remove(id);
        assert!(center.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_all_does_not_cancel_timers() {
        let center = NotificationCenter::new();
        center.add("Doomed", "1", Severity::Info, Some(Duration::from_secs(1)));
        center.add("Doomed", "2", Severity::Info, Some(Duration::from_secs(1)));

        center.clear_all();
        assert!(center.is_empty());

        // A sticky notification added after the clear must survive the
        // stale timers firing
        let kept = center.add("Kept", "alive", Severity::Success, Some(Duration::ZERO));

        tokio::time::sleep(Duration::from_secs(2)).await;
        let remaining = center.all();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept);
    }

    #[tokio::test(start_paused = true)]
    async fn test_convenience_wrappers_set_severity() {
        let center = NotificationCenter::new();
        center.success("a", "b", Some(Duration::ZERO));
        center.error("a", "b", Some(Duration::ZERO));
        center.warning("a", "b", Some(Duration::ZERO));
        center.info("a", "b", Some(Duration::ZERO));

        let severities: Vec<Severity> = center.all().iter().map(|n| n.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Success,
                Severity::Error,
                Severity::Warning,
                Severity::Info
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_clones_share_state() {
        let center = NotificationCenter::new();
        let clone = center.clone();

        let id = center.add("Shared", "state", Severity::Info, Some(Duration::ZERO));
        assert_eq!(clone.len(), 1);

        clone.remove(id);
        assert!(center.is_empty());
    }
}
