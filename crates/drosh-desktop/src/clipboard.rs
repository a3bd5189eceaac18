//! Clipboard adapter
//!
//! On X11 and on Wayland the copied text is served by the process that owns
//! the selection, so the `arboard::Clipboard` handle is kept for the
//! lifetime of the adapter instead of being dropped after each copy.
//!
//! A process that exits right after copying loses the selection with it.
//! Short-lived callers use [`ArboardClipboard::hold_until`] to keep serving
//! the text until a clipboard manager (or another application) takes it
//! over.

use std::sync::Mutex;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use arboard::Clipboard;
use drosh_core::ports::IClipboard;
use tracing::debug;

#[derive(Default)]
struct ClipboardState {
    handle: Option<Clipboard>,
    last_text: Option<String>,
}

impl ClipboardState {
    fn clipboard(&mut self) -> Result<&mut Clipboard> {
        if self.handle.is_none() {
            let clipboard = Clipboard::new().context("Failed to open system clipboard")?;
            debug!("Opened system clipboard");
            self.handle = Some(clipboard);
        }
        self.handle
            .as_mut()
            .ok_or_else(|| anyhow!("Clipboard unavailable"))
    }
}

/// System clipboard accessed through `arboard`
///
/// The handle is opened on first use. If a copy fails the handle is
/// discarded and reopened by the next call.
#[derive(Default)]
pub struct ArboardClipboard {
    state: Mutex<ClipboardState>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps serving the last copied text until another application owns
    /// the selection or `deadline` passes
    ///
    /// Blocks the calling thread. Returns `Ok(false)` without touching the
    /// system clipboard when nothing has been copied. Outside Linux the
    /// system keeps the text after exit, so this returns immediately.
    pub fn hold_until(&self, deadline: Instant) -> Result<bool> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("Clipboard lock poisoned"))?;

        let Some(text) = state.last_text.clone() else {
            return Ok(false);
        };

        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;

            debug!("Serving clipboard until it is taken over");
            let result = state
                .clipboard()?
                .set()
                .wait_until(deadline)
                .text(text)
                .context("Failed to hand over clipboard text");
            if result.is_err() {
                state.handle = None;
            }
            result?;
        }

        #[cfg(not(target_os = "linux"))]
        {
            let _ = (deadline, text);
        }

        Ok(true)
    }
}

impl IClipboard for ArboardClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("Clipboard lock poisoned"))?;

        let result = state
            .clipboard()
            .and_then(|clipboard| {
                clipboard
                    .set_text(text.to_string())
                    .context("Failed to set clipboard text")
            });

        match result {
            Ok(()) => state.last_text = Some(text.to_string()),
            Err(_) => state.handle = None,
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_hold_without_copy_returns_immediately() {
        let clipboard = ArboardClipboard::new();
        let deadline = Instant::now() + Duration::from_secs(60);

        let started = Instant::now();
        assert!(!clipboard.hold_until(deadline).unwrap());
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
