//! Use cases (interactors) for Drosh
//!
//! This module contains the application use cases that orchestrate the
//! domain types through port interfaces. They own every retry and recovery
//! decision; the adapters behind the ports never retry on their own.
//!
//! ## Use Cases
//!
//! - [`UploadScreenshotUseCase`] - Wait for a freshly written file and upload it
//! - [`ObtainLinkUseCase`] - Reuse or create the shared link for an uploaded file
//! - [`ScreenshotHandler`] - Run both for one event and tell the user the result

pub mod handle_screenshot;
pub mod obtain_link;
pub mod upload_screenshot;

#[cfg(test)]
pub(crate) mod fakes;

pub use handle_screenshot::ScreenshotHandler;
pub use obtain_link::ObtainLinkUseCase;
pub use upload_screenshot::UploadScreenshotUseCase;
