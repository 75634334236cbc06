//! Static file serving.
//!
//! HTML pages are read and served with the reload script injected.
//! Directories without an `index.html` get a plain listing. Everything else
//! goes through `tower-http`'s `ServeDir`, which handles MIME types, range
//! requests and conditional requests.

mod listing;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::response::{Html, IntoResponse, Response};
use percent_encoding::percent_decode_str;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::error::FileError;
use crate::live_reload::inject_reload_script;
use crate::state::AppState;

/// File served for directory requests.
const INDEX_FILE: &str = "index.html";

/// Serve a file from the root directory.
pub(crate) async fn serve_file(State(state): State<Arc<AppState>>, req: Request<Body>) -> Response {
    let request_path = req.uri().path().to_owned();
    let Some(relative) = resolve_path(&request_path) else {
        return FileError::NotFound(request_path).into_response();
    };

    let fs_path = state.root_dir.join(relative);
    let is_dir_request = request_path.ends_with('/');

    if matches!(*req.method(), Method::GET | Method::HEAD) {
        let page = if is_dir_request {
            fs_path.join(INDEX_FILE)
        } else {
            fs_path.clone()
        };

        if is_html_file(&page).await {
            return serve_html(page).await.into_response();
        }

        if is_dir_request && is_dir(&fs_path).await {
            return match listing::render(&request_path, &fs_path).await {
                Ok(html) => Html(html).into_response(),
                Err(source) => FileError::Read {
                    path: fs_path,
                    source,
                }
                .into_response(),
            };
        }
    }

    match ServeDir::new(&state.root_dir).oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Read an HTML page and inject the reload script.
///
/// Invalid UTF-8 is replaced rather than rejected.
async fn serve_html(path: PathBuf) -> Result<Html<String>, FileError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| FileError::Read { path, source })?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(Html(inject_reload_script(&content).into_owned()))
}

/// Convert a URL path into a path relative to the root directory.
///
/// Returns `None` for paths that are not valid UTF-8 after decoding or that
/// contain parent, root or prefix components, so the result can never point
/// outside the root.
fn resolve_path(request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;

    let mut relative = PathBuf::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            _ if segment.contains('\\') || segment.contains('\0') => return None,
            _ => {
                let mut components = Path::new(segment).components();
                match (components.next(), components.next()) {
                    (Some(std::path::Component::Normal(name)), None) => relative.push(name),
                    _ => return None,
                }
            }
        }
    }
    Some(relative)
}

async fn is_html_file(path: &Path) -> bool {
    let is_html_name = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(".html"));
    is_html_name
        && tokio::fs::metadata(path)
            .await
            .is_ok_and(|m| m.is_file())
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|m| m.is_dir())
}
