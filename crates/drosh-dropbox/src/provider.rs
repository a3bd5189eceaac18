//! DropboxStorageClient - IStorageClient implementation for Dropbox
//!
//! Wraps the [`DropboxClient`] and delegates to the upload and sharing
//! modules to fulfil the [`IStorageClient`] port contract.
//!
//! ## Design Notes
//!
//! - Each port call issues exactly one HTTP request; nothing is retried here.
//! - Every [`DropboxError`] is classified into an [`ApiFailure`] at this
//!   boundary, after its raw form has been logged.

use async_trait::async_trait;
use tracing::warn;

use drosh_core::domain::{ApiFailure, RemotePath, SharedLink};
use drosh_core::ports::{ApiResult, IStorageClient};

use crate::client::DropboxClient;
use crate::{sharing, upload, DropboxError};

/// Dropbox-backed remote storage
pub struct DropboxStorageClient {
    client: DropboxClient,
}

impl DropboxStorageClient {
    /// Creates a new provider around an authenticated client
    pub fn new(client: DropboxClient) -> Self {
        Self { client }
    }
}

fn classify(operation: &'static str, path: &RemotePath, err: DropboxError) -> ApiFailure {
    warn!(operation, path = %path, error = %err, "Dropbox request failed");
    err.into()
}

#[async_trait]
impl IStorageClient for DropboxStorageClient {
    async fn upload(&self, data: &[u8], remote_path: &RemotePath) -> ApiResult<RemotePath> {
        upload::upload_file(&self.client, remote_path, data)
            .await
            .map_err(|e| classify("upload", remote_path, e))
    }

    async fn list_shared_links(&self, remote_path: &RemotePath) -> ApiResult<Vec<SharedLink>> {
        sharing::list_shared_links(&self.client, remote_path)
            .await
            .map_err(|e| classify("list_shared_links", remote_path, e))
    }

    async fn create_shared_link(&self, remote_path: &RemotePath) -> ApiResult<SharedLink> {
        sharing::create_shared_link(&self.client, remote_path)
            .await
            .map_err(|e| classify("create_shared_link", remote_path, e))
    }
}
