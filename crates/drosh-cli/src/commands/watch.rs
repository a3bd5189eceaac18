//! Watch command - share every new screenshot
//!
//! Watches the screenshot folder until SIGINT/SIGTERM. A watch source
//! failure or a full Dropbox account ends the command with an error.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use drosh_core::config::Config;
use drosh_desktop::ArboardClipboard;
use drosh_watch::{run_watch_loop, IgnoreFilter, ScreenshotWatcher};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::build_handler;
use crate::output::{get_formatter, OutputFormat};

/// Arguments for the watch subcommand
#[derive(Debug, clap::Args)]
pub struct WatchCommand {
    /// Folder to watch instead of `watch.screenshot_folder`
    #[arg(long)]
    pub folder: Option<PathBuf>,
}

impl WatchCommand {
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        let folder = match &self.folder {
            Some(folder) => folder.clone(),
            None => config.screenshot_folder()?.to_path_buf(),
        };
        if !folder.is_dir() {
            bail!("Screenshot folder does not exist: {}", folder.display());
        }

        let settings = config.pipeline_settings(&folder)?;
        let handler = build_handler(config, settings, Arc::new(ArboardClipboard::new()))?;
        let filter =
            IgnoreFilter::new(&config.watch.ignore_patterns).context("Invalid ignore pattern")?;

        let (watcher, mut events) = ScreenshotWatcher::start(&folder, filter)?;
        formatter.success(&format!("Watching {}", watcher.folder().display()));

        let shutdown = CancellationToken::new();
        let signal_token = shutdown.clone();
        tokio::spawn(async move {
            shutdown_signal(signal_token).await;
        });

        let result = run_watch_loop(&handler, &mut events, &shutdown).await;
        drop(watcher);

        match result {
            Ok(summary) => {
                info!(shared = summary.shared, failed = summary.failed, "Drosh stopped");
                if matches!(format, OutputFormat::Json) {
                    formatter.print_json(&serde_json::json!({
                        "success": true,
                        "shared": summary.shared,
                        "failed": summary.failed,
                    }));
                } else {
                    formatter.success(&format!(
                        "Stopped: {} shared, {} failed",
                        summary.shared, summary.failed
                    ));
                }
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Waits for SIGINT or SIGTERM, then cancels `token`
///
/// A signal that cannot be installed is logged and never fires.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }

    token.cancel();
}
