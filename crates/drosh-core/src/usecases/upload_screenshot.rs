//! Screenshot upload use case
//!
//! The watch source can report a file before the producing program has
//! flushed it, so the file may briefly be missing or empty. This use case
//! polls until the file has content, then uploads it exactly once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::PipelineSettings;
use crate::domain::{ApiFailure, RemotePath, ScreenshotEvent, UploadFailure, UploadResult};
use crate::ports::{ILocalFileSystem, IStorageClient};

/// Use case for uploading one screenshot
pub struct UploadScreenshotUseCase {
    storage: Arc<dyn IStorageClient>,
    local_filesystem: Arc<dyn ILocalFileSystem>,
    settings: Arc<PipelineSettings>,
}

impl UploadScreenshotUseCase {
    /// Creates a new UploadScreenshotUseCase
    ///
    /// # Arguments
    ///
    /// * `storage` - Remote store the file is written to
    /// * `local_filesystem` - Local file access for probing and reading
    /// * `settings` - Folders and retry budget
    pub fn new(
        storage: Arc<dyn IStorageClient>,
        local_filesystem: Arc<dyn ILocalFileSystem>,
        settings: Arc<PipelineSettings>,
    ) -> Self {
        Self {
            storage,
            local_filesystem,
            settings,
        }
    }

    /// Uploads the file named by `event`
    ///
    /// This method:
    /// 1. Resolves the local path (local folder + base name) and the remote
    ///    path (remote folder + same base name)
    /// 2. Polls the local file until it is non-empty, within the retry budget
    /// 3. Reads the whole file and writes it to the remote store
    ///
    /// # Returns
    ///
    /// The remote path the backend confirmed, which differs from the
    /// requested one if the backend auto-renamed the object
    ///
    /// # Errors
    ///
    /// - `FileNeverReady` if the file stayed missing or empty
    /// - `QuotaExceeded` if the account is out of space
    /// - `BackendError` for any other backend failure (not retried)
    pub async fn upload(&self, event: &ScreenshotEvent) -> Result<UploadResult, UploadFailure> {
        let (local_path, remote_path) = self.resolve_paths(event)?;
        debug!(
            local = %local_path.display(),
            remote = %remote_path,
            "Resolved upload paths"
        );

        let size = self.wait_until_ready(&local_path).await?;

        let data = self
            .local_filesystem
            .read_file(&local_path)
            .await
            .map_err(|e| {
                error!(path = %local_path.display(), error = %e, "Failed to read screenshot");
                UploadFailure::ReadFailed(format!("{}: {:#}", local_path.display(), e))
            })?;

        info!(
            local = %local_path.display(),
            remote = %remote_path,
            size,
            bytes = data.len(),
            "Uploading screenshot"
        );

        match self.storage.upload(&data, &remote_path).await {
            Ok(stored_path) => {
                if stored_path != remote_path {
                    info!(
                        requested = %remote_path,
                        stored = %stored_path,
                        "Backend renamed uploaded file"
                    );
                }
                debug!(path = %stored_path, "File uploaded successfully");
                Ok(UploadResult {
                    remote_path: stored_path,
                })
            }
            Err(ApiFailure::InsufficientStorage) => {
                error!(remote = %remote_path, "Cannot upload: insufficient storage space");
                Err(UploadFailure::QuotaExceeded)
            }
            Err(err) => {
                error!(remote = %remote_path, error = %err, "Upload failed");
                Err(err.into())
            }
        }
    }

    fn resolve_paths(&self, event: &ScreenshotEvent) -> Result<(PathBuf, RemotePath), UploadFailure> {
        let base_name = event.base_name().ok_or_else(|| {
            UploadFailure::InvalidFileName(event.local_file_name().display().to_string())
        })?;

        let local_path = self.settings.local_folder.join(base_name);
        let remote_path = self
            .settings
            .remote_folder
            .join(base_name)
            .map_err(|e| UploadFailure::InvalidFileName(e.to_string()))?;

        Ok((local_path, remote_path))
    }

    /// Polls `path` until it has a positive size
    ///
    /// Makes at most `file_ready_attempts` probes, sleeping the configured
    /// interval between consecutive probes. Probe errors count as "not ready".
    async fn wait_until_ready(&self, path: &Path) -> Result<u64, UploadFailure> {
        let attempts = self.settings.retry.file_ready_attempts;
        let interval = self.settings.retry.file_ready_interval();

        for attempt in 1..=attempts {
            match self.local_filesystem.file_size(path).await {
                Ok(Some(size)) if size > 0 => {
                    if attempt > 1 {
                        debug!(path = %path.display(), attempt, "File became ready");
                    }
                    return Ok(size);
                }
                Ok(Some(_)) => {
                    debug!(path = %path.display(), attempt, "File is still empty");
                }
                Ok(None) => {
                    debug!(path = %path.display(), attempt, "File does not exist yet");
                }
                Err(e) => {
                    warn!(path = %path.display(), attempt, error = %e, "Failed to probe file size");
                }
            }

            if attempt < attempts {
                tokio::time::sleep(interval).await;
            }
        }

        warn!(path = %path.display(), attempts, "File never became ready");
        Err(UploadFailure::FileNeverReady {
            path: path.to_path_buf(),
            attempts,
        })
    }
}
