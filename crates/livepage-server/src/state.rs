//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::live_reload::ReloadFlag;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Absolute directory files are served from.
    pub(crate) root_dir: PathBuf,
    /// Pending reload flag, also held by the change watcher.
    pub(crate) reload: Arc<ReloadFlag>,
}
