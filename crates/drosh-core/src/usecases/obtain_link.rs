//! Shared link use case
//!
//! Reuses an existing shared link for an uploaded file when the backend
//! already has one, and creates a new link otherwise. Failed attempts back
//! off linearly before the next one.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::RetryConfig;
use crate::domain::{ApiFailure, LinkFailure, RemotePath, SharedLink};
use crate::ports::{ApiResult, IStorageClient};

/// Use case for getting a shareable URL for an uploaded file
pub struct ObtainLinkUseCase {
    storage: Arc<dyn IStorageClient>,
    retry: RetryConfig,
}

impl ObtainLinkUseCase {
    /// Creates a new ObtainLinkUseCase
    pub fn new(storage: Arc<dyn IStorageClient>, retry: RetryConfig) -> Self {
        Self { storage, retry }
    }

    /// Returns a shared link for `remote_path`
    ///
    /// Each attempt lists the links already attached to the path and returns
    /// the first one; when there are none a new link is created. An attempt
    /// fails if either call fails. After the failed attempt with zero-based
    /// index `i` the use case waits `i * link_backoff_step` before trying
    /// again. There is no wait after the final attempt.
    ///
    /// # Errors
    ///
    /// `LinkFailure::Exhausted` carrying the last backend error once every
    /// attempt has failed.
    pub async fn obtain_link(&self, remote_path: &RemotePath) -> Result<SharedLink, LinkFailure> {
        let attempts = self.retry.link_attempts.max(1);
        let mut last_error = ApiFailure::Other("no attempt made".to_string());

        for attempt in 0..attempts {
            match self.try_once(remote_path).await {
                Ok(link) => {
                    info!(path = %remote_path, url = %link.url, attempt, "Shared link ready");
                    return Ok(link);
                }
                Err(e) => {
                    warn!(
                        path = %remote_path,
                        attempt,
                        error = %e,
                        "Shared link attempt failed"
                    );
                    last_error = e;
                }
            }

            if attempt + 1 < attempts {
                let delay = self.retry.link_backoff(attempt);
                debug!(delay_ms = delay.as_millis() as u64, "Backing off before next link attempt");
                tokio::time::sleep(delay).await;
            }
        }

        Err(LinkFailure::Exhausted {
            attempts,
            last_error,
        })
    }

    async fn try_once(&self, remote_path: &RemotePath) -> ApiResult<SharedLink> {
        let existing = self.storage.list_shared_links(remote_path).await?;
        if let Some(link) = existing.into_iter().next() {
            debug!(path = %remote_path, "Reusing existing shared link");
            return Ok(link);
        }

        debug!(path = %remote_path, "No shared link yet, creating one");
        self.storage.create_shared_link(remote_path).await
    }
}
