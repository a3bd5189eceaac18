//! Shared link operations for the Dropbox API
//!
//! - [`list_shared_links`] - Links that already exist for exactly one path
//! - [`create_shared_link`] - New link with the account's default settings

use drosh_core::domain::{RemotePath, SharedLink};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::DropboxClient;
use crate::DropboxError;

const LIST_ENDPOINT: &str = "/sharing/list_shared_links";
const CREATE_ENDPOINT: &str = "/sharing/create_shared_link_with_settings";

#[derive(Debug, Serialize)]
struct ListSharedLinksArg<'a> {
    path: &'a str,
    /// Only links to the path itself, not to its parent folders
    direct_only: bool,
}

#[derive(Debug, Serialize)]
struct CreateSharedLinkArg<'a> {
    path: &'a str,
}

/// A `SharedLinkMetadata` entry; only the URL is used
#[derive(Debug, Deserialize)]
struct SharedLinkMetadata {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ListSharedLinksResult {
    #[serde(default)]
    links: Vec<SharedLinkMetadata>,
}

/// Lists the shared links attached directly to `remote_path`
///
/// Returns an empty vector if the path has no link yet. Only the first
/// page is read; a path has at most a handful of direct links.
pub async fn list_shared_links(
    client: &DropboxClient,
    remote_path: &RemotePath,
) -> Result<Vec<SharedLink>, DropboxError> {
    debug!(path = %remote_path, "Listing shared links");

    let request = client.rpc(LIST_ENDPOINT).json(&ListSharedLinksArg {
        path: remote_path.as_str(),
        direct_only: true,
    });
    let result: ListSharedLinksResult = client.send_json(request, LIST_ENDPOINT).await?;

    debug!(path = %remote_path, count = result.links.len(), "Shared links listed");
    Ok(result
        .links
        .into_iter()
        .map(|l| SharedLink::new(l.url))
        .collect())
}

/// Creates a shared link for `remote_path`
///
/// Fails with a 409 `shared_link_already_exists` error if a link was
/// created between listing and this call.
pub async fn create_shared_link(
    client: &DropboxClient,
    remote_path: &RemotePath,
) -> Result<SharedLink, DropboxError> {
    debug!(path = %remote_path, "Creating shared link");

    let request = client.rpc(CREATE_ENDPOINT).json(&CreateSharedLinkArg {
        path: remote_path.as_str(),
    });
    let link: SharedLinkMetadata = client.send_json(request, CREATE_ENDPOINT).await?;

    Ok(SharedLink::new(link.url))
}
