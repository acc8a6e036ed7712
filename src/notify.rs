//! Transient status messages.
//!
//! At most one notification is live. Each one carries its own deadline, and
//! expiry only ever compares the clock against the deadline of the message
//! currently shown, so a deadline belonging to a replaced message can never
//! clear a newer one. Time is read through an injected [`Clock`] so expiry can
//! be driven deterministically in tests.

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use tracing::trace;

/// How long a notification stays visible unless configured otherwise.
pub const DEFAULT_NOTICE_SECS: u64 = 3;

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A live status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: NoticeKind,
    pub expires_at: DateTime<Utc>,
}

/// Owner of the single live notification and its deadline.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_NOTICE_SECS as i64))
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    /// Replace the current message and restart the countdown.
    pub fn notify(&mut self, text: impl Into<String>, kind: NoticeKind, clock: &impl Clock) {
        let expires_at = clock.utc() + self.ttl;
        let text = text.into();
        trace!(%expires_at, text = %text, "notification set");
        self.current = Some(Notification {
            text,
            kind,
            expires_at,
        });
    }

    /// Clear the message if its deadline has passed. Returns true if it cleared.
    pub fn expire(&mut self, clock: &impl Clock) -> bool {
        let now = clock.utc();
        match &self.current {
            Some(n) if now >= n.expires_at => {
                trace!(text = %n.text, "notification expired");
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the message and its pending deadline.
    pub fn cancel(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Message text, or an empty string once cleared.
    pub fn text(&self) -> &str {
        self.current.as_ref().map_or("", |n| n.text.as_str())
    }
}
