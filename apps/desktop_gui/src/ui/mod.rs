//! UI layer for the desktop form: app shell and panels.

pub mod app;

pub use app::{DesktopGuiApp, StartupConfig};
