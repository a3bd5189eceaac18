//! Drosh Watch - screenshot folder watcher and event loop
//!
//! Provides:
//! - [`filesystem`] - Local filesystem adapter used by the upload use case
//! - [`watcher`] - `notify`-based watcher forwarding finished writes
//! - [`run_watch_loop`] - Sequential dispatch of watch events to a handler
//!
//! Events are handled strictly one at a time in arrival order. While a
//! screenshot is being handled (including its retry waits) later events
//! stay queued in the channel.

pub mod filesystem;
pub mod watcher;

use async_trait::async_trait;
use drosh_core::domain::{HandlerError, HandlerOutcome, ScreenshotEvent};
use drosh_core::usecases::ScreenshotHandler;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub use filesystem::LocalFileSystemAdapter;
pub use watcher::{IgnoreFilter, ScreenshotWatcher, WatchMessage};

/// Reasons the watch loop stopped without being asked to
#[derive(Debug, Error)]
pub enum WatchError {
    /// The OS watcher reported an error
    #[error("Watch source failed: {0}")]
    Source(String),

    /// The event channel closed
    #[error("Watch source stopped delivering events")]
    SourceClosed,

    /// The handler hit an unrecoverable condition
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// Something that processes one screenshot event to completion
#[async_trait]
pub trait HandleScreenshot: Send + Sync {
    async fn handle(&self, event: &ScreenshotEvent) -> Result<HandlerOutcome, HandlerError>;
}

#[async_trait]
impl HandleScreenshot for ScreenshotHandler {
    async fn handle(&self, event: &ScreenshotEvent) -> Result<HandlerOutcome, HandlerError> {
        ScreenshotHandler::handle(self, event).await
    }
}

/// Counts of handled events, reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub shared: usize,
    pub failed: usize,
}

impl LoopSummary {
    fn record(&mut self, outcome: &HandlerOutcome) {
        if outcome.is_success() {
            self.shared += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Runs the watch loop until shutdown, source failure or a fatal error
///
/// Shutdown is only observed between events; a screenshot that is being
/// handled runs to completion first.
///
/// # Returns
/// The summary of handled events when `shutdown` was cancelled
///
/// # Errors
/// - [`WatchError::Source`] / [`WatchError::SourceClosed`] when the watch
///   source fails or goes away
/// - [`WatchError::Handler`] when the handler reports a fatal error
pub async fn run_watch_loop<H>(
    handler: &H,
    events: &mut mpsc::Receiver<WatchMessage>,
    shutdown: &CancellationToken,
) -> Result<LoopSummary, WatchError>
where
    H: HandleScreenshot + ?Sized,
{
    let mut summary = LoopSummary::default();
    info!("Listening for new screenshots");

    loop {
        let message = tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                info!(shared = summary.shared, failed = summary.failed, "Watch loop shutting down");
                return Ok(summary);
            }
            message = events.recv() => message,
        };

        match message {
            Some(WatchMessage::Screenshot(event)) => {
                info!(file = %event.local_file_name().display(), "Upload and create shared link");
                match handler.handle(&event).await {
                    Ok(outcome) => summary.record(&outcome),
                    Err(e) => {
                        error!(error = %e, "Stopping watch loop");
                        return Err(e.into());
                    }
                }
            }
            Some(WatchMessage::Error(e)) => {
                error!(error = %e, "Watch source failed");
                return Err(WatchError::Source(e));
            }
            None => {
                warn!("Watch channel closed");
                return Err(WatchError::SourceClosed);
            }
        }
    }
}
