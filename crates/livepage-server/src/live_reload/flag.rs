//! Pending-reload flag shared between the watcher and the status endpoint.

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether a file change is waiting to be delivered to a browser.
///
/// Raised by [`ChangeWatcher`](super::ChangeWatcher) and consumed by the
/// status endpoint. Each raise is delivered to at most one poll.
#[derive(Debug, Default)]
pub struct ReloadFlag {
    pending: AtomicBool,
}

impl ReloadFlag {
    /// Create a cleared flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a reload as pending.
    pub fn raise(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Return whether a reload was pending, clearing it.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Peek at the flag without consuming it.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}
