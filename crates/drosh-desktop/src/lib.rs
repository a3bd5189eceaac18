//! Drosh Desktop - best-effort desktop integration
//!
//! Adapters for the two desktop side effects of a shared screenshot:
//!
//! - [`notification`] - Pop-up notification via `notify-send`, falling back
//!   to `kdialog --passivepopup`
//! - [`clipboard`] - Copying the shared link with `arboard`
//!
//! Both report failures through `anyhow::Result`; the core logs and
//! discards them.

pub mod clipboard;
pub mod notification;

pub use clipboard::ArboardClipboard;
pub use notification::{DesktopNotifier, NotifyBackend, NotifyStyle};
