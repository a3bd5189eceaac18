//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the use cases depend
//! on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IStorageClient`] - Remote object storage (upload, shared links)
//! - [`ILocalFileSystem`] - Size probing and reading of local files
//! - [`INotificationService`] - Desktop notifications
//! - [`IClipboard`] - System clipboard

pub mod clipboard;
pub mod local_filesystem;
pub mod notification;
pub mod storage;

pub use clipboard::IClipboard;
pub use local_filesystem::ILocalFileSystem;
pub use notification::{INotificationService, Notification, NotificationPriority};
pub use storage::{ApiResult, IStorageClient};
