//! Domain error types
//!
//! This module defines the failure taxonomy of the upload-and-link flow:
//! backend failures reported by the storage port, upload failures, link
//! failures, and the single fatal error the handler escalates.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in domain value construction
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid remote path format
    #[error("Invalid remote path: {0}")]
    InvalidRemotePath(String),
}

/// A failure reported by the remote storage backend
///
/// The storage port classifies every backend error into one of these kinds.
/// Timeouts and transport errors are reported as [`ApiFailure::Other`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// The account has no space left for the object
    #[error("Insufficient storage space")]
    InsufficientStorage,

    /// The backend supplied a message intended for the end user
    #[error("Backend message: {0}")]
    UserFacingMessage(String),

    /// Any other backend, transport or decoding error
    #[error("Backend error: {0}")]
    Other(String),
}

/// Errors that terminate an upload
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    /// The local file never became non-empty within the polling budget
    #[error("File {} was not ready after {attempts} attempts", path.display())]
    FileNeverReady {
        /// The local path that was polled
        path: PathBuf,
        /// Number of polling attempts made
        attempts: u32,
    },

    /// The storage account is out of space; terminates the process
    #[error("Storage quota exceeded")]
    QuotaExceeded,

    /// The backend rejected the upload
    #[error("Upload rejected by backend: {0}")]
    BackendError(String),

    /// The file had a positive size but could not be read
    #[error("Failed to read local file: {0}")]
    ReadFailed(String),

    /// The event named something that is not a usable file name
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
}

impl UploadFailure {
    /// Returns true if this failure must stop the whole process
    pub fn is_fatal(&self) -> bool {
        matches!(self, UploadFailure::QuotaExceeded)
    }
}

impl From<ApiFailure> for UploadFailure {
    fn from(err: ApiFailure) -> Self {
        match err {
            ApiFailure::InsufficientStorage => UploadFailure::QuotaExceeded,
            ApiFailure::UserFacingMessage(text) => UploadFailure::BackendError(text),
            ApiFailure::Other(details) => UploadFailure::BackendError(details),
        }
    }
}

/// Errors that terminate shared link creation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkFailure {
    /// Every attempt failed
    #[error("Shared link creation failed after {attempts} attempts: {last_error}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// The error raised by the final attempt
        last_error: ApiFailure,
    },
}

/// Errors the screenshot handler escalates to its caller
///
/// Per-file failures are reported as a failed outcome; only conditions
/// that make further processing pointless surface here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// An unrecoverable environment condition
    #[error("Fatal: {0}")]
    Fatal(#[source] UploadFailure),
}
