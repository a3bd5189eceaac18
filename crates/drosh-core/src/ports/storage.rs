//! Remote storage port (driven/secondary port)
//!
//! This module defines the capability surface the use cases need from the
//! remote object store: write bytes to a path, and look up or create the
//! public shared link for a path.
//!
//! ## Design Notes
//!
//! - Unlike the other ports, this one returns a typed [`ApiFailure`]
//!   because the use cases branch on the failure kind (quota vs. other).
//! - Implementations must not retry; retry policy belongs to the use cases.
//! - Transport errors and timeouts are reported as [`ApiFailure::Other`].

use crate::domain::{ApiFailure, RemotePath, SharedLink};

/// Result type for storage port operations
pub type ApiResult<T> = Result<T, ApiFailure>;

/// Port trait for the remote object store
#[async_trait::async_trait]
pub trait IStorageClient: Send + Sync {
    /// Writes `data` to `remote_path`, overwriting any existing object
    ///
    /// Conflicts are resolved by auto-rename, so the returned path is the
    /// one the backend actually stored the object under.
    ///
    /// # Arguments
    /// * `data` - The full file contents
    /// * `remote_path` - The requested destination path
    ///
    /// # Returns
    /// The backend-confirmed path of the stored object
    async fn upload(&self, data: &[u8], remote_path: &RemotePath) -> ApiResult<RemotePath>;

    /// Lists the shared links that exist for exactly `remote_path`
    ///
    /// Returns an empty vector if no link has been created yet.
    async fn list_shared_links(&self, remote_path: &RemotePath) -> ApiResult<Vec<SharedLink>>;

    /// Creates a new shared link for `remote_path` with default settings
    async fn create_shared_link(&self, remote_path: &RemotePath) -> ApiResult<SharedLink>;
}
