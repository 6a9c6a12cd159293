//! Toast queue backing user notifications.
//!
//! The application only emits [`Notification`]s; the plugin shim pushes them
//! here and the renderer draws the live ones in the top-right corner.

use crate::app::Notification;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// Toasts beyond this many push out the oldest.
const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: &'static str,
    pub expires_at: DateTime<Utc>,
}

/// Live toasts, oldest first.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(TOAST_LIFETIME)
    }
}

impl ToastQueue {
    #[must_use]
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::with_capacity(MAX_TOASTS),
            lifetime,
        }
    }

    pub fn push(&mut self, notification: Notification, now: DateTime<Utc>) {
        let lifetime = chrono::Duration::from_std(self.lifetime).unwrap_or(chrono::Duration::zero());
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            message: notification.message(),
            expires_at: now + lifetime,
        });
        tracing::debug!(message = notification.message(), "toast shown");
    }

    /// Drops expired toasts; returns whether any were removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.expires_at > now);
        before != self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn toasts_expire_after_their_lifetime() {
        let mut queue = ToastQueue::default();
        queue.push(Notification::NoResults, at(0));
        queue.push(Notification::FetchError, at(2));

        assert!(!queue.expire(at(3)));
        assert!(queue.expire(at(4)));
        assert_eq!(queue.iter().map(|t| t.message).collect::<Vec<_>>(), vec![
            Notification::FetchError.message()
        ]);
        assert!(queue.expire(at(6)));
        assert!(queue.is_empty());
    }

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let mut queue = ToastQueue::default();
        queue.push(Notification::EmptyQuery, at(0));
        queue.push(Notification::NoResults, at(0));
        queue.push(Notification::NoResults, at(0));
        queue.push(Notification::FetchError, at(0));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.iter().next().map(|t| t.message), Some(Notification::NoResults.message()));
    }
}
