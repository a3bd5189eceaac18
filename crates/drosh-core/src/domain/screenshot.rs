//! Transient types for processing a single screenshot
//!
//! Nothing here outlives one handling cycle: an event is created when the
//! watch source reports a finished write, flows through upload and link
//! creation, and is dropped once a notification has been raised.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::newtypes::RemotePath;

/// A finished write of a file in the screenshot folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotEvent {
    local_file_name: PathBuf,
}

impl ScreenshotEvent {
    /// Creates an event for a file name relative to the screenshot folder
    pub fn new(local_file_name: impl Into<PathBuf>) -> Self {
        Self {
            local_file_name: local_file_name.into(),
        }
    }

    /// The file name as reported by the watch source
    pub fn local_file_name(&self) -> &Path {
        &self.local_file_name
    }

    /// The base name of the file, if it has a usable one
    pub fn base_name(&self) -> Option<&str> {
        self.local_file_name
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
    }
}

/// The object the backend stored for a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Backend-confirmed path; differs from the requested one after auto-rename
    pub remote_path: RemotePath,
}

/// A public URL granting read access to one stored object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedLink {
    pub url: String,
}

impl SharedLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Stages of the screenshot handler
///
/// The handler moves strictly forward:
/// `Received -> Uploading -> LinkPending -> Notifying -> Done`,
/// with `Failed` reachable from `Uploading` and `LinkPending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerState {
    Received,
    Uploading,
    LinkPending,
    Notifying,
    Done,
    Failed,
}

impl HandlerState {
    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: HandlerState) -> bool {
        use HandlerState::*;
        matches!(
            (self, next),
            (Received, Uploading)
                | (Uploading, LinkPending)
                | (Uploading, Failed)
                | (LinkPending, Notifying)
                | (LinkPending, Failed)
                | (Notifying, Done)
        )
    }
}

impl fmt::Display for HandlerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandlerState::Received => "received",
            HandlerState::Uploading => "uploading",
            HandlerState::LinkPending => "link_pending",
            HandlerState::Notifying => "notifying",
            HandlerState::Done => "done",
            HandlerState::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// The stage at which a screenshot failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Upload,
    Link,
}

/// Result of handling one screenshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HandlerOutcome {
    /// The file was uploaded and a shared link is available
    Shared {
        remote_path: RemotePath,
        link: SharedLink,
    },
    /// Processing stopped; `reason` carries the diagnostic detail
    Failed { stage: FailureStage, reason: String },
}

impl HandlerOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, HandlerOutcome::Shared { .. })
    }

    /// The shared link URL, for successful outcomes
    pub fn url(&self) -> Option<&str> {
        match self {
            HandlerOutcome::Shared { link, .. } => Some(&link.url),
            HandlerOutcome::Failed { .. } => None,
        }
    }
}
