//! Live reload support.
//!
//! The [`ChangeWatcher`] polls the served directory and raises a shared
//! [`ReloadFlag`]. Pages pick the flag up through the status endpoint using
//! the script injected by [`inject_reload_script`].

mod flag;
mod inject;
mod signature;
mod watcher;

pub use flag::ReloadFlag;
pub(crate) use inject::inject_reload_script;
pub use watcher::{ChangeWatcher, DEFAULT_POLL_INTERVAL};

/// Route of the reload status endpoint.
pub const STATUS_ROUTE: &str = "/reload-status";
