//! Request logging middleware.
//!
//! Logs one line per request. Polls of the reload status endpoint happen
//! every second per open page and are not logged.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::live_reload::STATUS_ROUTE;

/// Log method, path, status and latency of every non-status request.
pub(crate) async fn log_requests(req: Request, next: Next) -> Response {
    if !should_log(req.uri().path()) {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        %uri,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Request served"
    );
    response
}

fn should_log(path: &str) -> bool {
    path != STATUS_ROUTE
}
