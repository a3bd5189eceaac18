//! Integration tests for `files/upload`

use std::time::Duration;

use drosh_core::domain::ApiFailure;
use drosh_core::ports::IStorageClient;
use wiremock::{
    matchers::{bearer_token, header, method, path},
    Mock, ResponseTemplate,
};

use crate::common;

#[tokio::test]
async fn test_upload_sends_contents_and_arguments() {
    let (server, provider) = common::setup_dropbox_mock().await;
    common::mount_upload(&server, "/remote/shot.png").await;

    let stored = provider
        .upload(b"0123456789", &common::remote("/remote/shot.png"))
        .await
        .expect("Upload failed");
    assert_eq!(stored.as_str(), "/remote/shot.png");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    assert_eq!(request.body, b"0123456789".to_vec());
    assert_eq!(
        request.headers.get("authorization").unwrap().to_str().unwrap(),
        format!("Bearer {}", common::TOKEN)
    );
    assert_eq!(
        request.headers.get("content-type").unwrap().to_str().unwrap(),
        "application/octet-stream"
    );

    let arg: serde_json::Value = serde_json::from_str(
        request
            .headers
            .get("Dropbox-API-Arg")
            .unwrap()
            .to_str()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(
        arg,
        serde_json::json!({
            "path": "/remote/shot.png",
            "mode": "overwrite",
            "autorename": true,
            "mute": false
        })
    );
}

#[tokio::test]
async fn test_upload_returns_auto_renamed_path() {
    let (server, provider) = common::setup_dropbox_mock().await;
    common::mount_upload(&server, "/remote/shot (1).png").await;

    let stored = provider
        .upload(b"png", &common::remote("/remote/shot.png"))
        .await
        .expect("Upload failed");

    assert_eq!(stored.as_str(), "/remote/shot (1).png");
}

#[tokio::test]
async fn test_upload_requires_bearer_token() {
    let (server, provider) = common::setup_dropbox_mock().await;
    Mock::given(method("POST"))
        .and(path("/files/upload"))
        .and(bearer_token(common::TOKEN))
        .and(header("content-type", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "a.png",
            "path_display": "/remote/a.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    provider
        .upload(b"png", &common::remote("/remote/a.png"))
        .await
        .expect("Upload failed");
}

#[tokio::test]
async fn test_insufficient_space_is_classified() {
    let (server, provider) = common::setup_dropbox_mock().await;
    common::mount_error(
        &server,
        "/files/upload",
        409,
        serde_json::json!({
            "error_summary": "path/insufficient_space/..",
            "error": {
                ".tag": "path",
                "reason": {".tag": "insufficient_space"},
                "upload_session_id": "pid_upload_session:ABC"
            }
        }),
    )
    .await;

    let err = provider
        .upload(b"png", &common::remote("/remote/a.png"))
        .await
        .unwrap_err();

    assert_eq!(err, ApiFailure::InsufficientStorage);
}

#[tokio::test]
async fn test_user_message_is_surfaced() {
    let (server, provider) = common::setup_dropbox_mock().await;
    common::mount_error(
        &server,
        "/files/upload",
        409,
        serde_json::json!({
            "error_summary": "path/disallowed_name/",
            "error": {".tag": "path", "reason": {".tag": "disallowed_name"}},
            "user_message": {"locale": "en", "text": "This file name is not allowed."}
        }),
    )
    .await;

    let err = provider
        .upload(b"png", &common::remote("/remote/a.png"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiFailure::UserFacingMessage("This file name is not allowed.".to_string())
    );
}

#[tokio::test]
async fn test_server_error_is_other() {
    let (server, provider) = common::setup_dropbox_mock().await;
    Mock::given(method("POST"))
        .and(path("/files/upload"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider
        .upload(b"png", &common::remote("/remote/a.png"))
        .await
        .unwrap_err();

    match err {
        ApiFailure::Other(details) => assert!(details.contains("503")),
        other => panic!("unexpected failure: {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_is_other() {
    let (server, _) = common::setup_dropbox_mock().await;
    Mock::given(method("POST"))
        .and(path("/files/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"name": "a.png", "path_display": "/remote/a.png"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let provider = common::provider_with_timeout(&server, Duration::from_millis(200));
    let err = provider
        .upload(b"png", &common::remote("/remote/a.png"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiFailure::Other(_)));
}

#[tokio::test]
async fn test_malformed_response_is_other() {
    let (server, provider) = common::setup_dropbox_mock().await;
    Mock::given(method("POST"))
        .and(path("/files/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider
        .upload(b"png", &common::remote("/remote/a.png"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiFailure::Other(_)));
}
