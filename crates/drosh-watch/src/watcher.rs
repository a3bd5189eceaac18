//! Screenshot folder watching
//!
//! Provides a [`ScreenshotWatcher`] that wraps the `notify` crate to monitor
//! the screenshot folder, converting raw OS events into [`WatchMessage`]
//! values.
//!
//! Only "closed after write" events are forwarded: screenshot tools create
//! the file, write it, then close it, and the close is the first moment the
//! content can be complete. Names matching an ignore pattern (editor
//! backups, partial downloads, hidden files) are dropped.
//!
//! ## Architecture
//!
//! ```text
//! inotify (IN_CLOSE_WRITE)
//!       │
//!       ▼
//!  ScreenshotWatcher  ──→  mpsc::channel  ──→  run_watch_loop  ──→  ScreenshotHandler
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use drosh_core::domain::ScreenshotEvent;
use glob::{MatchOptions, Pattern, PatternError};
use notify::event::{AccessKind, AccessMode};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Capacity of the channel between the OS watcher and the event loop
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Message delivered by the watcher to the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchMessage {
    /// A file in the screenshot folder was closed after writing
    Screenshot(ScreenshotEvent),
    /// The OS watcher reported an error
    Error(String),
}

// ============================================================================
// IgnoreFilter
// ============================================================================

/// Glob-based file name filter
///
/// Patterns are matched against the base name only. A leading `*` also
/// matches names that start with a dot.
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
    patterns: Vec<Pattern>,
}

impl IgnoreFilter {
    /// Compiles `patterns`
    ///
    /// # Errors
    /// Returns the first pattern that is not a valid glob
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns true if `name` matches any pattern
    pub fn is_ignored(&self, name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.patterns.iter().any(|p| p.matches_with(name, options))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// ============================================================================
// ScreenshotWatcher
// ============================================================================

/// Watches the screenshot folder (non-recursively) for completed writes
///
/// Dropping the watcher stops watching and closes the event channel once
/// every queued message has been received.
///
/// ## Usage
///
/// ```ignore
/// let (watcher, mut rx) = ScreenshotWatcher::start(folder, IgnoreFilter::default())?;
/// while let Some(message) = rx.recv().await { /* ... */ }
/// drop(watcher);
/// ```
pub struct ScreenshotWatcher {
    /// The underlying notify watcher instance
    _watcher: RecommendedWatcher,
    /// The folder being watched
    folder: PathBuf,
}

impl ScreenshotWatcher {
    /// Starts watching `folder`
    ///
    /// # Returns
    /// A tuple of `(ScreenshotWatcher, mpsc::Receiver<WatchMessage>)`.
    ///
    /// # Errors
    /// Returns an error if the OS watcher cannot be created or the folder
    /// cannot be watched (e.g., does not exist, insufficient permissions,
    /// or inotify watch limit reached)
    pub fn start(
        folder: &Path,
        filter: IgnoreFilter,
    ) -> Result<(Self, mpsc::Receiver<WatchMessage>)> {
        let (tx, rx) = mpsc::channel::<WatchMessage>(EVENT_CHANNEL_CAPACITY);

        info!(
            path = %folder.display(),
            ignore_patterns = filter.len(),
            "Initializing screenshot watcher"
        );

        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<notify::Event, notify::Error>| {
                let messages = match res {
                    Ok(event) => map_notify_event(&event, &filter)
                        .into_iter()
                        .map(WatchMessage::Screenshot)
                        .collect(),
                    Err(err) => {
                        error!(error = %err, "Screenshot watcher error");
                        vec![WatchMessage::Error(err.to_string())]
                    }
                };
                for message in messages {
                    if let Err(e) = tx.blocking_send(message) {
                        warn!(error = %e, "Failed to send watch message (receiver dropped)");
                    }
                }
            },
            notify::Config::default(),
        )
        .context("Failed to create file watcher")?;

        watcher
            .watch(folder, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch path: {}", folder.display()))?;

        Ok((
            Self {
                _watcher: watcher,
                folder: folder.to_path_buf(),
            },
            rx,
        ))
    }

    /// Returns the folder being watched
    pub fn folder(&self) -> &Path {
        &self.folder
    }
}

// ============================================================================
// Event mapping - notify::Event → ScreenshotEvent
// ============================================================================

/// Converts a `notify::Event` into screenshot events
///
/// Only `Access(Close(Write))` produces events, one per path whose base
/// name is valid UTF-8 and not ignored. Every other kind is dropped.
fn map_notify_event(event: &notify::Event, filter: &IgnoreFilter) -> Vec<ScreenshotEvent> {
    if !matches!(
        event.kind,
        EventKind::Access(AccessKind::Close(AccessMode::Write))
    ) {
        debug!(kind = ?event.kind, "Ignoring event kind");
        return Vec::new();
    }

    event
        .paths
        .iter()
        .filter_map(|path| {
            let raw_name = path.file_name()?;
            let Some(name) = raw_name.to_str() else {
                debug!(name = ?raw_name, "Ignoring file with non-UTF-8 name");
                return None;
            };
            if filter.is_ignored(name) {
                debug!(name, "Ignoring file matching ignore pattern");
                return None;
            }
            debug!(name, "Mapped close-write event");
            Some(ScreenshotEvent::new(name))
        })
        .collect()
}
