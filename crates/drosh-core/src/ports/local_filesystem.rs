//! Local filesystem port (driven/secondary port)
//!
//! The upload use case only needs two capabilities from the local disk:
//! probing a file's size (to detect files that are still being written)
//! and reading its full contents.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because filesystem errors are adapter-specific.
//! - File watching lives in the `drosh-watch` crate and is not part of
//!   this port.

use std::path::Path;

/// Port trait for local file access
#[async_trait::async_trait]
pub trait ILocalFileSystem: Send + Sync {
    /// Returns the size of the regular file at `path`
    ///
    /// Returns `None` if the path does not exist or is not a regular file.
    async fn file_size(&self, path: &Path) -> anyhow::Result<Option<u64>>;

    /// Reads the entire contents of the file at `path`
    async fn read_file(&self, path: &Path) -> anyhow::Result<Vec<u8>>;
}
