//! Drosh Core - Domain logic for screenshot sharing
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `ScreenshotEvent`, `UploadResult`, `SharedLink`, `RemotePath`
//! - **Use cases** - `UploadScreenshotUseCase`, `ObtainLinkUseCase`, `ScreenshotHandler`
//! - **Port definitions** - Traits for adapters: `IStorageClient`, `ILocalFileSystem`,
//!   `INotificationService`, `IClipboard`
//!
//! # Architecture
//!
//! The domain module holds plain data and the error taxonomy. Ports define
//! the trait interfaces that adapter crates implement (Dropbox, desktop,
//! local filesystem). Use cases own the retry and recovery policy and talk
//! to the outside world only through ports.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
