//! Notification service port (driven/secondary port)
//!
//! This module defines the interface for telling the user how a screenshot
//! upload ended. Implementations may shell out to `notify-send`, use a
//! desktop-environment-specific tool, or fall back between several.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because notification delivery is adapter-specific.
//! - Notifications are fire-and-forget; the caller does not wait for
//!   user interaction and never fails because a notification could not
//!   be shown.

use serde::{Deserialize, Serialize};

/// Priority level for a notification
///
/// Maps to urgency levels in notification systems (e.g., libnotify urgency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    /// Low priority, may not be shown immediately
    Low,
    /// Normal priority, shown in the notification area
    #[default]
    Normal,
    /// Critical priority, persists until acknowledged
    Critical,
}

impl std::fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationPriority::Low => "low",
            NotificationPriority::Normal => "normal",
            NotificationPriority::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// A notification to display to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Title of the notification (short, descriptive)
    pub title: String,
    /// Body text; the shared URL on success, a fixed message on failure
    pub body: String,
    /// Priority level affecting how the notification is displayed
    pub priority: NotificationPriority,
}

impl Notification {
    /// Creates a new notification with `Normal` priority
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            priority: NotificationPriority::Normal,
        }
    }

    /// Sets the priority level
    pub fn with_priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Creates a success notification
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body)
    }

    /// Creates an error notification with Critical priority
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body).with_priority(NotificationPriority::Critical)
    }
}

/// Port trait for desktop notifications
///
/// Implementations should report delivery problems through the returned
/// error rather than panicking; callers log and discard it.
#[async_trait::async_trait]
pub trait INotificationService: Send + Sync {
    /// Sends a desktop notification to the user
    ///
    /// # Arguments
    /// * `notification` - The notification content and metadata
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()>;
}
