//! Transient user notifications ("toasts").
//!
//! Every `notify` call creates an independent toast: no deduplication, no
//! queueing. A toast is visible for [`DISPLAY_MS`], then plays an exit
//! transition for [`EXIT_MS`], then is gone. Expiry is derived from the
//! issue timestamp, so nothing has to be scheduled or cancelled.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// How long a toast stays fully visible, in milliseconds.
pub const DISPLAY_MS: i64 = 3_000;

/// Length of the exit transition, in milliseconds.
pub const EXIT_MS: i64 = 300;

/// Visual severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    #[default]
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A message to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }
}

/// Where a toast is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Exiting,
    Dismissed,
}

/// An issued notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: u64,
    #[serde(flatten)]
    pub notice: Notice,
    pub issued_at: DateTime<Utc>,
}

impl Toast {
    /// When the exit transition starts.
    #[must_use]
    pub fn exit_at(&self) -> DateTime<Utc> {
        self.issued_at + TimeDelta::milliseconds(DISPLAY_MS)
    }

    /// When the toast is removed.
    #[must_use]
    pub fn dismiss_at(&self) -> DateTime<Utc> {
        self.exit_at() + TimeDelta::milliseconds(EXIT_MS)
    }

    #[must_use]
    pub fn phase(&self, now: DateTime<Utc>) -> ToastPhase {
        if now >= self.dismiss_at() {
            ToastPhase::Dismissed
        } else if now >= self.exit_at() {
            ToastPhase::Exiting
        } else {
            ToastPhase::Visible
        }
    }

    /// Milliseconds left before the exit transition starts, clamped at zero.
    #[must_use]
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        (self.exit_at() - now).num_milliseconds().max(0)
    }
}

/// Issues toasts and keeps the ones still on screen.
#[derive(Debug, Default)]
pub struct Notifier {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a toast now.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> Toast {
        self.issue(Notice::new(message, severity), Utc::now())
    }

    /// Issue a toast for `notice` stamped at `now`.
    pub fn issue(&mut self, notice: Notice, now: DateTime<Utc>) -> Toast {
        self.next_id += 1;
        let toast = Toast {
            id: self.next_id,
            notice,
            issued_at: now,
        };
        tracing::debug!(
            toast_id = toast.id,
            severity = toast.notice.severity.as_str(),
            message = %toast.notice.message,
            "notification issued"
        );
        self.toasts.push(toast.clone());
        toast
    }

    /// Toasts not yet dismissed at `now`, oldest first. Dismissed toasts are dropped.
    pub fn active(&mut self, now: DateTime<Utc>) -> Vec<Toast> {
        self.toasts
            .retain(|toast| toast.phase(now) != ToastPhase::Dismissed);
        self.toasts.clone()
    }
}
