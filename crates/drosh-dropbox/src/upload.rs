//! Upload operations for the Dropbox API
//!
//! Screenshots are small, so every file goes up in a single
//! `POST /files/upload` request on the content host. Larger files
//! would need an upload session, which Drosh does not use.
//!
//! ## Dropbox API References
//!
//! - [files/upload](https://www.dropbox.com/developers/documentation/http/documentation#files-upload)

use drosh_core::domain::RemotePath;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{header_json, DropboxClient};
use crate::DropboxError;

const UPLOAD_ENDPOINT: &str = "/files/upload";

/// Arguments of `files/upload`, sent in the `Dropbox-API-Arg` header
#[derive(Debug, Serialize)]
struct UploadArg<'a> {
    path: &'a str,
    mode: &'static str,
    autorename: bool,
    mute: bool,
}

/// The subset of `FileMetadata` Drosh reads back
#[derive(Debug, Deserialize)]
struct FileMetadata {
    /// File name as stored (after auto-rename)
    name: String,
    /// Cased path of the stored file
    path_display: Option<String>,
    /// Lowercased path, present even when `path_display` is not
    path_lower: Option<String>,
    /// Size in bytes
    size: Option<u64>,
}

/// Uploads `data` to `remote_path`, overwriting an existing file
///
/// Uses overwrite mode with `autorename` enabled: if the write conflicts
/// the file is stored under a disambiguated name, which is returned.
///
/// # Arguments
/// * `client` - The authenticated DropboxClient
/// * `remote_path` - Requested destination path
/// * `data` - File contents
///
/// # Returns
/// The path Dropbox stored the file under
pub async fn upload_file(
    client: &DropboxClient,
    remote_path: &RemotePath,
    data: &[u8],
) -> Result<RemotePath, DropboxError> {
    let arg = header_json(&UploadArg {
        path: remote_path.as_str(),
        mode: "overwrite",
        autorename: true,
        mute: false,
    })?;
    debug!(path = %remote_path, bytes = data.len(), "Uploading file");

    let request = client
        .content(UPLOAD_ENDPOINT)
        .header("Dropbox-API-Arg", arg)
        .header("Content-Type", "application/octet-stream")
        .body(data.to_vec());

    let metadata: FileMetadata = client.send_json(request, UPLOAD_ENDPOINT).await?;
    debug!(
        name = %metadata.name,
        size = metadata.size.unwrap_or(0),
        "Upload completed"
    );

    let stored = metadata
        .path_display
        .or(metadata.path_lower)
        .ok_or_else(|| DropboxError::InvalidResponse("upload response has no path".to_string()))?;

    RemotePath::new(stored).map_err(|e| DropboxError::InvalidResponse(e.to_string()))
}
