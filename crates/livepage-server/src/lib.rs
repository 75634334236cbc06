//! Live-reloading static file server.
//!
//! Serves a directory over HTTP and reloads open pages when watched files
//! change:
//! - HTML pages are served with a small script that polls `/reload-status`
//! - A background watcher compares a path+mtime signature of the watched
//!   files once per poll interval and raises a shared reload flag
//! - Every other file is served as-is by `tower-http`
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use livepage_server::{Server, ServerConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         root_dir: PathBuf::from("/home/me/site/src"),
//!         ..ServerConfig::default()
//!     };
//!
//!     let server = Server::bind(config).await.unwrap();
//!     let shutdown = CancellationToken::new();
//!
//!     let signal = shutdown.clone();
//!     tokio::spawn(async move {
//!         livepage_server::shutdown_signal().await;
//!         signal.cancel();
//!     });
//!
//!     server.run(shutdown).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (livepage-server)
//!    ▲                   │
//!    │                   ├─► GET /reload-status ──► ReloadFlag::take
//!    │                   │                              ▲
//!    │                   │                              │ raise
//!    │                   │                        ChangeWatcher (poll + diff)
//!    │                   │
//!    └── poll script ◄───┴─► Static files (HTML injection, ServeDir)
//! ```

mod app;
mod error;
mod handlers;
mod live_reload;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub use error::ServerError;
pub use live_reload::{ChangeWatcher, DEFAULT_POLL_INTERVAL, ReloadFlag, STATUS_ROUTE};
use state::AppState;

/// Default port.
pub const DEFAULT_PORT: u16 = 8002;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on (`0` picks a free port).
    pub port: u16,
    /// Directory to serve and watch.
    pub root_dir: PathBuf,
    /// Time between watch cycles.
    pub poll_interval: Duration,
    /// Watched file extensions, without the leading dot.
    pub watch_extensions: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: DEFAULT_PORT,
            root_dir: PathBuf::from("src"),
            poll_interval: DEFAULT_POLL_INTERVAL,
            watch_extensions: vec!["html".to_owned(), "css".to_owned(), "js".to_owned()],
        }
    }
}

/// A bound server, ready to run.
pub struct Server {
    listener: TcpListener,
    router: Router,
    watcher: ChangeWatcher,
    reload: Arc<ReloadFlag>,
}

impl Server {
    /// Validate the root directory and bind the listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory does not exist or the address
    /// cannot be bound.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let root_dir = std::path::absolute(&config.root_dir)
            .map_err(|_| ServerError::RootDir(config.root_dir.clone()))?;
        if !tokio::fs::metadata(&root_dir)
            .await
            .is_ok_and(|m| m.is_dir())
        {
            return Err(ServerError::RootDir(root_dir));
        }

        let reload = Arc::new(ReloadFlag::new());
        let watcher = ChangeWatcher::new(
            root_dir.clone(),
            &config.watch_extensions,
            Arc::clone(&reload),
            config.poll_interval,
        );

        let state = Arc::new(AppState {
            root_dir,
            reload: Arc::clone(&reload),
        });
        let router = app::create_router(state);

        let address = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind { address, source })?;

        Ok(Self {
            listener,
            router,
            watcher,
            reload,
        })
    }

    /// Address the listener is bound to.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket address cannot be queried.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// The flag shared by the watcher and the status endpoint.
    #[must_use]
    pub fn reload_flag(&self) -> Arc<ReloadFlag> {
        Arc::clone(&self.reload)
    }

    /// Serve requests and watch for changes until `shutdown` is cancelled.
    ///
    /// Cancelling stops the watcher, stops accepting connections and closes
    /// the listener once open connections finish.
    ///
    /// # Errors
    ///
    /// Returns an error if accepting connections fails.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), ServerError> {
        let watcher = self.watcher.spawn(shutdown.clone());

        if let Ok(addr) = self.listener.local_addr() {
            tracing::info!(address = %addr, "Starting server");
        }

        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown.clone().cancelled_owned())
            .await;

        // Also stops the watcher when serving failed.
        shutdown.cancel();
        if let Err(e) = watcher.await {
            tracing::warn!(error = %e, "Change watcher task failed");
        }

        result.map_err(ServerError::Serve)
    }
}

/// Wait for shutdown signal (Ctrl-C).
///
/// If the handler cannot be installed the server runs until killed.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
