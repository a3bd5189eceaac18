//! Shared test helpers for Dropbox API integration tests
//!
//! Each helper mounts one mock endpoint. Both Dropbox hosts are served by
//! the same mock server, so routes are matched on path alone.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drosh_core::domain::RemotePath;
use drosh_dropbox::client::DropboxClient;
use drosh_dropbox::provider::DropboxStorageClient;

pub const TOKEN: &str = "test-access-token";

/// Starts a mock server and returns a provider pointing at it
pub async fn setup_dropbox_mock() -> (MockServer, DropboxStorageClient) {
    let server = MockServer::start().await;
    let client = DropboxClient::with_base_url(TOKEN, server.uri()).expect("client");
    (server, DropboxStorageClient::new(client))
}

/// Provider against `server` with a short request timeout
pub fn provider_with_timeout(server: &MockServer, timeout: Duration) -> DropboxStorageClient {
    let client = DropboxClient::with_base_urls(TOKEN, server.uri(), server.uri(), timeout)
        .expect("client");
    DropboxStorageClient::new(client)
}

pub fn remote(p: &str) -> RemotePath {
    RemotePath::new(p.to_string()).expect("valid remote path")
}

/// Mounts `files/upload` answering with metadata for `stored_path`
pub async fn mount_upload(server: &MockServer, stored_path: &str) {
    let name = stored_path.rsplit('/').next().unwrap_or_default();
    Mock::given(method("POST"))
        .and(path("/files/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": name,
            "id": "id:a4ayc_80_OEAAAAAAAAAXw",
            "client_modified": "2026-01-15T10:00:00Z",
            "server_modified": "2026-01-15T10:00:01Z",
            "rev": "a1c10ce0dd78",
            "size": 10,
            "path_lower": stored_path.to_lowercase(),
            "path_display": stored_path,
        })))
        .mount(server)
        .await;
}

/// Mounts `sharing/list_shared_links` returning `urls`
pub async fn mount_list_links(server: &MockServer, urls: &[&str]) {
    let links: Vec<serde_json::Value> = urls
        .iter()
        .map(|u| {
            serde_json::json!({
                ".tag": "file",
                "url": u,
                "name": "shot.png",
                "path_lower": "/remote/shot.png",
            })
        })
        .collect();

    Mock::given(method("POST"))
        .and(path("/sharing/list_shared_links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "links": links,
            "has_more": false,
        })))
        .mount(server)
        .await;
}

/// Mounts `sharing/create_shared_link_with_settings` returning `url`
pub async fn mount_create_link(server: &MockServer, url: &str) {
    Mock::given(method("POST"))
        .and(path("/sharing/create_shared_link_with_settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            ".tag": "file",
            "url": url,
            "name": "shot.png",
            "path_lower": "/remote/shot.png",
        })))
        .mount(server)
        .await;
}

/// Mounts `route` answering with `status` and a JSON error body
pub async fn mount_error(server: &MockServer, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}
