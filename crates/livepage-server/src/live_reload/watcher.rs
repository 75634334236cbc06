//! Polling change watcher.
//!
//! Recomputes the directory signature on a fixed interval and raises the
//! reload flag whenever it differs from the previous one.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::flag::ReloadFlag;
use super::signature::SignatureScanner;

/// Default time between watch cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Compares consecutive signatures.
///
/// The first observed signature is only a baseline and never counts as a
/// change.
#[derive(Debug, Default)]
pub(crate) struct ChangeDetector {
    previous: Option<u64>,
}

impl ChangeDetector {
    /// Record `signature` and report whether it differs from the last one.
    pub(crate) fn observe(&mut self, signature: u64) -> bool {
        let changed = self.previous.is_some_and(|previous| previous != signature);
        self.previous = Some(signature);
        changed
    }
}

/// Background task that raises a [`ReloadFlag`] when watched files change.
pub struct ChangeWatcher {
    scanner: Arc<SignatureScanner>,
    flag: Arc<ReloadFlag>,
    poll_interval: Duration,
}

impl ChangeWatcher {
    /// Create a watcher.
    ///
    /// # Arguments
    ///
    /// * `root_dir` - Directory to walk recursively
    /// * `extensions` - File extensions to watch, without the dot
    /// * `flag` - Flag raised on change
    /// * `poll_interval` - Time between watch cycles
    #[must_use]
    pub fn new(
        root_dir: PathBuf,
        extensions: &[String],
        flag: Arc<ReloadFlag>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            scanner: Arc::new(SignatureScanner::new(root_dir, extensions)),
            flag,
            poll_interval,
        }
    }

    /// Spawn the watch loop on the current tokio runtime.
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Run watch cycles until `shutdown` is cancelled.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut detector = ChangeDetector::default();

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                () = tokio::time::sleep(self.poll_interval) => {}
            }

            let scanner = Arc::clone(&self.scanner);
            let signature = match tokio::task::spawn_blocking(move || scanner.signature()).await
            {
                Ok(signature) => signature,
                Err(e) => {
                    tracing::warn!(error = %e, "Watch cycle aborted");
                    continue;
                }
            };

            if detector.observe(signature) {
                self.flag.raise();
                tracing::info!("Files changed - reload needed");
            }
        }

        tracing::debug!("Change watcher stopped");
    }
}
