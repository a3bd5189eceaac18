//! Drosh Dropbox - Dropbox API v2 client
//!
//! Provides an async client for the three Dropbox operations Drosh needs:
//! - Single-request file upload (overwrite mode, auto-rename on conflict)
//! - Listing the shared links of a path
//! - Creating a shared link with default settings
//!
//! ## Modules
//!
//! - [`client`] - Authenticated HTTP client and error decoding
//! - [`upload`] - `files/upload` on the content endpoint
//! - [`sharing`] - `sharing/*` on the RPC endpoint
//! - [`provider`] - [`IStorageClient`](drosh_core::ports::IStorageClient) adapter
//!
//! The client never retries. Every failure is reported once, as a
//! [`DropboxError`], and classified into an [`ApiFailure`] at the port.

pub mod client;
pub mod provider;
pub mod sharing;
pub mod upload;

use std::time::Duration;

use drosh_core::domain::ApiFailure;
use thiserror::Error;

/// Errors that can occur when communicating with the Dropbox API
#[derive(Debug, Error)]
pub enum DropboxError {
    /// The account has no space left for the write
    #[error("Insufficient space in Dropbox account")]
    InsufficientSpace,

    /// The endpoint returned a structured error (HTTP 409 and most 4xx)
    #[error("API error: {summary}")]
    Api {
        /// The `error_summary` field, or the raw body when not JSON
        summary: String,
        /// Localized text Dropbox intends for the end user, if any
        user_message: Option<String>,
    },

    /// The access token is missing, invalid or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded
    #[error("Too many requests, retry after {retry_after:?}")]
    TooManyRequests {
        /// Wait suggested by the `Retry-After` header
        retry_after: Option<Duration>,
    },

    /// A server-side error occurred (5xx)
    #[error("Server error: {0}")]
    ServerError(String),

    /// A network-level error occurred, including timeouts
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl DropboxError {
    /// Text Dropbox supplied for display to the user, if any
    pub fn user_message(&self) -> Option<&str> {
        match self {
            DropboxError::Api {
                user_message: Some(text),
                ..
            } if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

impl From<DropboxError> for ApiFailure {
    fn from(err: DropboxError) -> Self {
        if matches!(err, DropboxError::InsufficientSpace) {
            return ApiFailure::InsufficientStorage;
        }
        if let Some(text) = err.user_message() {
            return ApiFailure::UserFacingMessage(text.to_string());
        }
        ApiFailure::Other(err.to_string())
    }
}
