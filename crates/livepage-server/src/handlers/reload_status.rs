//! Reload status endpoint.
//!
//! Polled by the injected script once per second.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /reload-status.
#[derive(Debug, Serialize)]
pub(crate) struct ReloadStatusResponse {
    /// Whether the page should reload.
    reload: bool,
}

/// Handle GET /reload-status.
///
/// Consumes the pending flag, so concurrent pollers see a change only once.
pub(crate) async fn get_reload_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let reload = state.reload.take();
    (
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(ReloadStatusResponse { reload }),
    )
}
