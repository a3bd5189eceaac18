//! Upload command - share a single file
//!
//! Runs the same pipeline as the watch loop for one file: wait until it is
//! written, upload it, obtain a shared link, copy the link and notify.
//!
//! On Linux the process owns the copied link until something else takes
//! the selection over, so after a successful share the command keeps
//! serving the clipboard for up to [`CLIPBOARD_HOLD`] before exiting.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use drosh_core::config::Config;
use drosh_core::domain::{HandlerError, HandlerOutcome, ScreenshotEvent};
use drosh_desktop::ArboardClipboard;
use tracing::{info, warn};

use super::build_handler;
use crate::output::{get_formatter, OutputFormat, OutputFormatter};

/// Longest time the command waits for a clipboard manager to take the link
pub const CLIPBOARD_HOLD: Duration = Duration::from_secs(60);

/// Arguments for the upload subcommand
#[derive(Debug, clap::Args)]
pub struct UploadCommand {
    /// File to upload
    pub path: PathBuf,
}

impl UploadCommand {
    /// Uploads the file; fails if no shared link could be produced
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let (folder, name) = split_target(&self.path, &cwd)?;

        let settings = config.pipeline_settings(&folder)?;
        let clipboard = Arc::new(ArboardClipboard::new());
        let handler = build_handler(config, settings, Arc::clone(&clipboard))?;

        info!(folder = %folder.display(), file = ?name, "Single-shot upload");
        let result = handler.handle(&ScreenshotEvent::new(name)).await;
        finish(result, formatter.as_ref())?;

        hand_over_clipboard(clipboard).await;
        Ok(())
    }
}

/// Reports the handler result and turns anything but a shared link into an error
fn finish(
    result: Result<HandlerOutcome, HandlerError>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let outcome = result?;
    formatter.outcome(&outcome);

    match outcome {
        HandlerOutcome::Shared { .. } => Ok(()),
        HandlerOutcome::Failed { stage, reason } => {
            bail!("{:?} failed: {}", stage, reason)
        }
    }
}

async fn hand_over_clipboard(clipboard: Arc<ArboardClipboard>) {
    let deadline = Instant::now() + CLIPBOARD_HOLD;
    let held = tokio::task::spawn_blocking(move || clipboard.hold_until(deadline)).await;

    match held {
        Ok(Ok(true)) => info!("Clipboard handed over"),
        Ok(Ok(false)) => {}
        Ok(Err(e)) => warn!(error = %e, "Could not keep the link on the clipboard"),
        Err(e) => warn!(error = %e, "Clipboard hand-over task failed"),
    }
}

/// Splits `path` into the folder it lives in and its file name
///
/// Relative paths are resolved against `cwd`.
fn split_target(path: &Path, cwd: &Path) -> Result<(PathBuf, OsString)> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let name = absolute
        .file_name()
        .with_context(|| format!("Not a file path: {}", path.display()))?
        .to_os_string();
    let folder = absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());

    Ok((folder, name))
}
