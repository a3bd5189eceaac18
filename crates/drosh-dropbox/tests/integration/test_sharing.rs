//! Integration tests for the shared link endpoints

use drosh_core::domain::ApiFailure;
use drosh_core::ports::IStorageClient;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, ResponseTemplate,
};

use crate::common;

#[tokio::test]
async fn test_list_returns_existing_links_in_order() {
    let (server, provider) = common::setup_dropbox_mock().await;
    common::mount_list_links(
        &server,
        &[
            "https://www.dropbox.com/s/first/shot.png?dl=0",
            "https://www.dropbox.com/s/second/shot.png?dl=0",
        ],
    )
    .await;

    let links = provider
        .list_shared_links(&common::remote("/remote/shot.png"))
        .await
        .expect("List failed");

    let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://www.dropbox.com/s/first/shot.png?dl=0",
            "https://www.dropbox.com/s/second/shot.png?dl=0",
        ]
    );
}

#[tokio::test]
async fn test_list_asks_for_direct_links_only() {
    let (server, provider) = common::setup_dropbox_mock().await;
    Mock::given(method("POST"))
        .and(path("/sharing/list_shared_links"))
        .and(body_json(serde_json::json!({
            "path": "/remote/shot.png",
            "direct_only": true
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"links": [], "has_more": false})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let links = provider
        .list_shared_links(&common::remote("/remote/shot.png"))
        .await
        .expect("List failed");

    assert!(links.is_empty());
}

#[tokio::test]
async fn test_create_returns_new_link() {
    let (server, provider) = common::setup_dropbox_mock().await;
    Mock::given(method("POST"))
        .and(path("/sharing/create_shared_link_with_settings"))
        .and(body_json(serde_json::json!({"path": "/remote/shot.png"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            ".tag": "file",
            "url": "https://www.dropbox.com/s/new/shot.png?dl=0",
            "name": "shot.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let link = provider
        .create_shared_link(&common::remote("/remote/shot.png"))
        .await
        .expect("Create failed");

    assert_eq!(link.url, "https://www.dropbox.com/s/new/shot.png?dl=0");
}

#[tokio::test]
async fn test_create_uses_mounted_helper() {
    let (server, provider) = common::setup_dropbox_mock().await;
    common::mount_create_link(&server, "https://x/shot.png").await;

    let link = provider
        .create_shared_link(&common::remote("/remote/shot.png"))
        .await
        .expect("Create failed");

    assert_eq!(link.url, "https://x/shot.png");
}

#[tokio::test]
async fn test_existing_link_conflict_is_other() {
    let (server, provider) = common::setup_dropbox_mock().await;
    common::mount_error(
        &server,
        "/sharing/create_shared_link_with_settings",
        409,
        serde_json::json!({
            "error_summary": "shared_link_already_exists/..",
            "error": {".tag": "shared_link_already_exists"}
        }),
    )
    .await;

    let err = provider
        .create_shared_link(&common::remote("/remote/shot.png"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiFailure::Other("API error: shared_link_already_exists/..".to_string())
    );
}

#[tokio::test]
async fn test_invalid_token_is_other() {
    let (server, provider) = common::setup_dropbox_mock().await;
    common::mount_error(
        &server,
        "/sharing/list_shared_links",
        401,
        serde_json::json!({
            "error_summary": "invalid_access_token/...",
            "error": {".tag": "invalid_access_token"}
        }),
    )
    .await;

    let err = provider
        .list_shared_links(&common::remote("/remote/shot.png"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiFailure::Other("Unauthorized: invalid_access_token/...".to_string())
    );
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let (server, provider) = common::setup_dropbox_mock().await;
    Mock::given(method("POST"))
        .and(path("/sharing/list_shared_links"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "2")
                .set_body_json(serde_json::json!({
                    "error_summary": "too_many_requests/..",
                    "error": {"reason": {".tag": "too_many_requests"}, "retry_after": 2}
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = provider
        .list_shared_links(&common::remote("/remote/shot.png"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiFailure::Other(_)));
}
