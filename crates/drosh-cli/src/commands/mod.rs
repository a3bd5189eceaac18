//! CLI subcommands and the wiring they share

pub mod completions;
pub mod config;
pub mod upload;
pub mod watch;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use drosh_core::config::{Config, PipelineSettings};
use drosh_core::usecases::ScreenshotHandler;
use drosh_desktop::{ArboardClipboard, DesktopNotifier};
use drosh_dropbox::client::DropboxClient;
use drosh_dropbox::provider::DropboxStorageClient;
use drosh_watch::LocalFileSystemAdapter;

/// Builds a handler backed by Dropbox and the desktop session
pub(crate) fn build_handler(
    config: &Config,
    settings: PipelineSettings,
    clipboard: Arc<ArboardClipboard>,
) -> Result<ScreenshotHandler> {
    let client = DropboxClient::new(
        config.access_token()?,
        Duration::from_secs(config.storage.timeout_secs),
    )
    .context("Failed to create Dropbox client")?;

    Ok(ScreenshotHandler::new(
        Arc::new(DropboxStorageClient::new(client)),
        Arc::new(LocalFileSystemAdapter::new()),
        Arc::new(DesktopNotifier::new(config.notifications.timeout_secs)),
        clipboard,
        settings,
    ))
}
