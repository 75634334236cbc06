//! Error types for the HTTP server.

use std::io;
use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Server startup and runtime errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Root directory is missing or not a directory.
    #[error("Root directory not found: {}", .0.display())]
    RootDir(PathBuf),

    /// Listener could not be bound.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Serving connections failed.
    #[error("Server error: {0}")]
    Serve(#[from] io::Error),
}

/// Failures while serving a single file.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FileError {
    /// Request path does not resolve to a file under the root.
    #[error("File not found: {0}")]
    NotFound(String),

    /// File exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        if let Self::Read { path, source } = &self {
            tracing::warn!(path = %path.display(), error = %source, "Failed to read file");
        }
        (StatusCode::NOT_FOUND, "File not found").into_response()
    }
}
