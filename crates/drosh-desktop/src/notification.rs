//! Desktop notification adapter
//!
//! Shells out to a notification tool. Backends are tried in order and the
//! first one that runs successfully wins:
//!
//! 1. `notify-send` (libnotify, most desktops)
//! 2. `kdialog --passivepopup` (KDE without libnotify tools)

use std::io::ErrorKind;
use std::process::Stdio;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use drosh_core::ports::{INotificationService, Notification, NotificationPriority};
use tokio::process::Command;
use tracing::{debug, warn};

/// Default time a notification stays visible, in seconds
pub const DEFAULT_TIMEOUT_SECS: u32 = 5;

/// Command line convention of a notification tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyStyle {
    /// `notify-send [OPTIONS] TITLE BODY`
    NotifySend,
    /// `kdialog --title TITLE --passivepopup BODY SECONDS`
    Kdialog,
}

/// A notification tool to try
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyBackend {
    /// Executable name or path
    pub program: String,
    /// How its arguments are laid out
    pub style: NotifyStyle,
}

impl NotifyBackend {
    pub fn notify_send() -> Self {
        Self {
            program: "notify-send".to_string(),
            style: NotifyStyle::NotifySend,
        }
    }

    pub fn kdialog() -> Self {
        Self {
            program: "kdialog".to_string(),
            style: NotifyStyle::Kdialog,
        }
    }

    /// Builds the argument list for `notification`
    pub fn args(&self, notification: &Notification, timeout_secs: u32) -> Vec<String> {
        match self.style {
            NotifyStyle::NotifySend => vec![
                "--app-name=Drosh".to_string(),
                format!("--urgency={}", urgency(notification.priority)),
                format!("--expire-time={}", u64::from(timeout_secs) * 1000),
                notification.title.clone(),
                notification.body.clone(),
            ],
            NotifyStyle::Kdialog => vec![
                "--title".to_string(),
                notification.title.clone(),
                "--passivepopup".to_string(),
                notification.body.clone(),
                timeout_secs.to_string(),
            ],
        }
    }
}

fn urgency(priority: NotificationPriority) -> &'static str {
    match priority {
        NotificationPriority::Low => "low",
        NotificationPriority::Normal => "normal",
        NotificationPriority::Critical => "critical",
    }
}

/// Notification service backed by desktop command-line tools
pub struct DesktopNotifier {
    backends: Vec<NotifyBackend>,
    timeout_secs: u32,
}

impl DesktopNotifier {
    /// Creates a notifier using `notify-send`, then `kdialog`
    pub fn new(timeout_secs: u32) -> Self {
        Self::with_backends(
            vec![NotifyBackend::notify_send(), NotifyBackend::kdialog()],
            timeout_secs,
        )
    }

    /// Creates a notifier with an explicit backend order
    pub fn with_backends(backends: Vec<NotifyBackend>, timeout_secs: u32) -> Self {
        Self {
            backends,
            timeout_secs,
        }
    }

    pub fn backends(&self) -> &[NotifyBackend] {
        &self.backends
    }

    async fn run(&self, backend: &NotifyBackend, notification: &Notification) -> Result<()> {
        let output = Command::new(&backend.program)
            .args(backend.args(notification, self.timeout_secs))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", backend.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "{} exited with {}: {}",
                backend.program,
                output.status,
                stderr.trim()
            ));
        }
        Ok(())
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

#[async_trait]
impl INotificationService for DesktopNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        let mut last_error = None;

        for backend in &self.backends {
            match self.run(backend, notification).await {
                Ok(()) => {
                    debug!(program = %backend.program, title = %notification.title, "Notification shown");
                    return Ok(());
                }
                Err(e) => {
                    let missing = e
                        .downcast_ref::<std::io::Error>()
                        .map(|io| io.kind() == ErrorKind::NotFound)
                        .unwrap_or(false);
                    if missing {
                        debug!(program = %backend.program, "Notification tool not installed");
                    } else {
                        warn!(program = %backend.program, error = %e, "Notification tool failed");
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("No notification backend configured")))
    }
}
