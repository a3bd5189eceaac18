//! Screenshot event handler
//!
//! Runs the full pipeline for one screenshot: upload, shared link,
//! clipboard and notification. Every terminal outcome produces exactly one
//! notification. Notification bodies for failures are fixed strings; the
//! underlying error only goes to the log.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::config::PipelineSettings;
use crate::domain::{
    FailureStage, HandlerError, HandlerOutcome, HandlerState, ScreenshotEvent, SharedLink,
};
use crate::ports::{IClipboard, ILocalFileSystem, INotificationService, IStorageClient, Notification};

use super::{ObtainLinkUseCase, UploadScreenshotUseCase};

/// Notification body shown when the upload stage fails
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed";

/// Notification body shown when no shared link could be obtained
pub const LINK_FAILED_MESSAGE: &str = "Could not create shared link";

/// Orchestrates the processing of one [`ScreenshotEvent`]
pub struct ScreenshotHandler {
    upload: UploadScreenshotUseCase,
    link: ObtainLinkUseCase,
    notifier: Arc<dyn INotificationService>,
    clipboard: Arc<dyn IClipboard>,
    settings: Arc<PipelineSettings>,
}

impl ScreenshotHandler {
    /// Wires the handler to its ports
    pub fn new(
        storage: Arc<dyn IStorageClient>,
        local_filesystem: Arc<dyn ILocalFileSystem>,
        notifier: Arc<dyn INotificationService>,
        clipboard: Arc<dyn IClipboard>,
        settings: PipelineSettings,
    ) -> Self {
        let settings = Arc::new(settings);
        Self {
            upload: UploadScreenshotUseCase::new(
                Arc::clone(&storage),
                local_filesystem,
                Arc::clone(&settings),
            ),
            link: ObtainLinkUseCase::new(storage, settings.retry),
            notifier,
            clipboard,
            settings,
        }
    }

    /// Handles one screenshot event to completion
    ///
    /// Per-file failures are returned as [`HandlerOutcome::Failed`] after
    /// the error notification went out.
    ///
    /// # Errors
    ///
    /// [`HandlerError::Fatal`] when the storage account is out of space.
    /// The error notification has already been shown when this returns.
    #[instrument(skip(self), fields(file = %event.local_file_name().display()))]
    pub async fn handle(&self, event: &ScreenshotEvent) -> Result<HandlerOutcome, HandlerError> {
        let mut state = HandlerState::Received;
        info!("Screenshot received");

        advance(&mut state, HandlerState::Uploading);
        let uploaded = match self.upload.upload(event).await {
            Ok(uploaded) => uploaded,
            Err(failure) => {
                advance(&mut state, HandlerState::Failed);
                error!(error = %failure, "Screenshot upload failed");
                self.notify(Notification::error(
                    &self.settings.notification_title,
                    UPLOAD_FAILED_MESSAGE,
                ))
                .await;

                if failure.is_fatal() {
                    return Err(HandlerError::Fatal(failure));
                }
                return Ok(HandlerOutcome::Failed {
                    stage: FailureStage::Upload,
                    reason: failure.to_string(),
                });
            }
        };

        advance(&mut state, HandlerState::LinkPending);
        let link = match self.link.obtain_link(&uploaded.remote_path).await {
            Ok(link) => link,
            Err(failure) => {
                advance(&mut state, HandlerState::Failed);
                error!(path = %uploaded.remote_path, error = %failure, "Shared link unavailable");
                self.notify(Notification::error(
                    &self.settings.notification_title,
                    LINK_FAILED_MESSAGE,
                ))
                .await;
                return Ok(HandlerOutcome::Failed {
                    stage: FailureStage::Link,
                    reason: failure.to_string(),
                });
            }
        };

        advance(&mut state, HandlerState::Notifying);
        self.copy_to_clipboard(&link);
        self.notify(Notification::success(
            &self.settings.notification_title,
            link.url.clone(),
        ))
        .await;

        advance(&mut state, HandlerState::Done);
        info!(url = %link.url, path = %uploaded.remote_path, "Screenshot shared");

        Ok(HandlerOutcome::Shared {
            remote_path: uploaded.remote_path,
            link,
        })
    }

    fn copy_to_clipboard(&self, link: &SharedLink) {
        match self.clipboard.set_text(&link.url) {
            Ok(()) => debug!("Link copied to clipboard"),
            Err(e) => warn!(error = %e, "Failed to copy link to clipboard"),
        }
    }

    async fn notify(&self, notification: Notification) {
        if let Err(e) = self.notifier.notify(&notification).await {
            warn!(error = %e, body = %notification.body, "Failed to show notification");
        }
    }
}

fn advance(state: &mut HandlerState, next: HandlerState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal handler transition {} -> {}",
        state,
        next
    );
    debug!(from = %state, to = %next, "Handler state change");
    *state = next;
}
