//! Clipboard port (driven/secondary port)
//!
//! Clipboard access is unreliable across environments (no display server,
//! Wayland without the right protocols, headless sessions). Callers treat
//! every error from this port as non-fatal.

/// Port trait for the system clipboard
pub trait IClipboard: Send + Sync {
    /// Replaces the clipboard contents with `text`
    fn set_text(&self, text: &str) -> anyhow::Result<()>;
}
