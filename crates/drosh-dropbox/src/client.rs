//! Dropbox API client
//!
//! Provides a typed HTTP client for the Dropbox API v2. Handles the bearer
//! header, the split between the RPC and content hosts, the per-request
//! timeout and the decoding of Dropbox error bodies.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use drosh_dropbox::client::DropboxClient;
//!
//! # fn example() -> anyhow::Result<()> {
//! let client = DropboxClient::new("access-token-here", Duration::from_secs(30))?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::DropboxError;

/// Base URL for RPC-style endpoints (JSON in, JSON out)
const API_BASE_URL: &str = "https://api.dropboxapi.com/2";

/// Base URL for content-upload endpoints (bytes in, JSON out)
const CONTENT_BASE_URL: &str = "https://content.dropboxapi.com/2";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Error body
// ============================================================================

/// Error body returned by Dropbox endpoints
///
/// ```json
/// {
///   "error_summary": "path/insufficient_space/...",
///   "error": {".tag": "path", "reason": {".tag": "insufficient_space"}},
///   "user_message": {"locale": "en", "text": "..."}
/// }
/// ```
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error_summary: String,
    #[serde(default)]
    error: serde_json::Value,
    user_message: Option<UserMessage>,
}

#[derive(Debug, Deserialize)]
struct UserMessage {
    text: String,
}

fn tag(value: &serde_json::Value) -> Option<&str> {
    value.get(".tag").and_then(serde_json::Value::as_str)
}

/// Returns true if a route error describes a full account
fn is_insufficient_space(body: &ApiErrorBody) -> bool {
    let reason = body.error.get("reason").and_then(tag);
    if tag(&body.error) == Some("path") && reason == Some("insufficient_space") {
        return true;
    }
    body.error_summary.starts_with("path/insufficient_space")
}

// ============================================================================
// DropboxClient
// ============================================================================

/// HTTP client for Dropbox API calls
///
/// Wraps `reqwest::Client` with authentication headers and base URL
/// construction for both Dropbox hosts.
pub struct DropboxClient {
    /// The underlying HTTP client, carrying the request timeout
    client: Client,
    /// Base URL for RPC requests
    api_base_url: String,
    /// Base URL for content upload requests
    content_base_url: String,
    /// Long-lived access token
    access_token: String,
}

impl DropboxClient {
    /// Creates a new DropboxClient against the public Dropbox hosts
    ///
    /// # Arguments
    /// * `access_token` - A Dropbox access token with `files.content.write`
    ///   and `sharing.write` scopes
    /// * `timeout` - Limit for each individual request
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Result<Self, DropboxError> {
        Self::with_base_urls(access_token, API_BASE_URL, CONTENT_BASE_URL, timeout)
    }

    /// Creates a client with a single base URL for both hosts (useful for testing)
    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DropboxError> {
        let base_url = base_url.into();
        Self::with_base_urls(access_token, base_url.clone(), base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with custom base URLs and timeout
    pub fn with_base_urls(
        access_token: impl Into<String>,
        api_base_url: impl Into<String>,
        content_base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DropboxError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base_url: api_base_url.into(),
            content_base_url: content_base_url.into(),
            access_token: access_token.into(),
        })
    }

    /// Creates an authenticated POST to an RPC endpoint
    ///
    /// # Arguments
    /// * `endpoint` - Route relative to the base URL (e.g. "/sharing/list_shared_links")
    pub fn rpc(&self, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base_url, endpoint);
        self.client.post(&url).bearer_auth(&self.access_token)
    }

    /// Creates an authenticated POST to a content-upload endpoint
    ///
    /// # Arguments
    /// * `endpoint` - Route relative to the base URL (e.g. "/files/upload")
    pub fn content(&self, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.content_base_url, endpoint);
        self.client.post(&url).bearer_auth(&self.access_token)
    }

    /// Sends `request` and decodes a successful JSON response
    ///
    /// Non-success statuses are turned into a [`DropboxError`] by
    /// [`error_from_response`](Self::error_from_response).
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, DropboxError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!(endpoint, "Dropbox request timed out");
            }
            DropboxError::NetworkError(e)
        })?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "Dropbox response received");

        if !status.is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            DropboxError::InvalidResponse(format!("{}: {}", endpoint, e))
        })
    }

    /// Converts a non-success response into a [`DropboxError`]
    pub async fn error_from_response(response: Response) -> DropboxError {
        let status = response.status();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return DropboxError::NetworkError(e),
        };
        let parsed: Option<ApiErrorBody> = serde_json::from_str(&text).ok();

        match status {
            StatusCode::CONFLICT => match parsed {
                Some(body) if is_insufficient_space(&body) => DropboxError::InsufficientSpace,
                Some(body) => DropboxError::Api {
                    summary: body.error_summary,
                    user_message: body.user_message.map(|m| m.text),
                },
                None => DropboxError::InvalidResponse(format!("HTTP 409: {}", text)),
            },
            StatusCode::UNAUTHORIZED => DropboxError::Unauthorized(
                parsed
                    .map(|b| b.error_summary)
                    .filter(|s| !s.is_empty())
                    .unwrap_or(text),
            ),
            StatusCode::TOO_MANY_REQUESTS => DropboxError::TooManyRequests { retry_after },
            s if s.is_server_error() => DropboxError::ServerError(format!("HTTP {}: {}", s.as_u16(), text)),
            s => match parsed {
                Some(body) => DropboxError::Api {
                    summary: body.error_summary,
                    user_message: body.user_message.map(|m| m.text),
                },
                None => DropboxError::Api {
                    summary: format!("HTTP {}: {}", s.as_u16(), text),
                    user_message: None,
                },
            },
        }
    }
}

/// Serializes `value` as JSON safe to place in an HTTP header
///
/// Dropbox takes the arguments of content endpoints in the
/// `Dropbox-API-Arg` header, which must be ASCII. Characters outside
/// printable ASCII are written as `\uXXXX` escapes.
pub fn header_json<T: serde::Serialize>(value: &T) -> Result<String, DropboxError> {
    let json = serde_json::to_string(value)
        .map_err(|e| DropboxError::InvalidResponse(format!("Failed to encode arguments: {}", e)))?;

    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if (' '..='~').contains(&c) {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    Ok(out)
}
