//! Domain entities and error types
//!
//! This module contains the core domain types for Drosh:
//! - Newtypes for validated remote paths
//! - Transient screenshot processing types (event, upload result, shared link)
//! - The handler state machine and its outcome
//! - Domain-specific error types

pub mod errors;
pub mod newtypes;
pub mod screenshot;

// Re-export commonly used types
pub use errors::{ApiFailure, DomainError, HandlerError, LinkFailure, UploadFailure};
pub use newtypes::RemotePath;
pub use screenshot::{
    FailureStage, HandlerOutcome, HandlerState, ScreenshotEvent, SharedLink, UploadResult,
};
