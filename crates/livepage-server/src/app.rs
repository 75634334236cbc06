//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::handlers;
use crate::live_reload::STATUS_ROUTE;
use crate::middleware::request_log;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            STATUS_ROUTE,
            get(handlers::reload_status::get_reload_status),
        )
        .fallback(static_files::serve_file)
        .layer(middleware::from_fn(request_log::log_requests))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::live_reload::ReloadFlag;

    const SCRIPT_MARKER: &str = "fetch(\"/reload-status\")";

    fn test_state(root: &Path) -> Arc<AppState> {
        Arc::new(AppState {
            root_dir: root.to_path_buf(),
            reload: Arc::new(ReloadFlag::new()),
        })
    }

    async fn get(state: &Arc<AppState>, uri: &str) -> Response {
        create_router(Arc::clone(state))
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn header_value<'a>(response: &'a Response, name: header::HeaderName) -> &'a str {
        response.headers().get(name).unwrap().to_str().unwrap()
    }

    #[tokio::test]
    async fn test_status_initially_false() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state = test_state(temp_dir.path());

        let response = get(&state, "/reload-status").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            header_value(&response, header::CONTENT_TYPE),
            "application/json"
        );
        assert_eq!(
            header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "*"
        );
        assert_eq!(body_string(response).await, r#"{"reload":false}"#);
    }

    #[tokio::test]
    async fn test_status_consumes_pending_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state = test_state(temp_dir.path());
        state.reload.raise();

        let first = get(&state, "/reload-status").await;
        let second = get(&state, "/reload-status?t=1").await;

        assert_eq!(body_string(first).await, r#"{"reload":true}"#);
        assert_eq!(body_string(second).await, r#"{"reload":false}"#);
    }

    #[tokio::test]
    async fn test_html_gets_script_before_body_close() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("index.html"),
            "<html><body>Hi</body></html>",
        )
        .unwrap();
        let state = test_state(temp_dir.path());

        let response = get(&state, "/index.html").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(header_value(&response, header::CONTENT_TYPE).starts_with("text/html"));
        let body = body_string(response).await;
        assert!(body.starts_with("<html><body>Hi<script>"));
        assert!(body.ends_with("</script></body></html>"));
        assert_eq!(body.matches(SCRIPT_MARKER).count(), 1);
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("index.html"),
            "<html><body>Home</body></html>",
        )
        .unwrap();
        let state = test_state(temp_dir.path());

        let root = body_string(get(&state, "/").await).await;
        let index = body_string(get(&state, "/index.html").await).await;

        assert_eq!(root, index);
        assert!(root.contains(SCRIPT_MARKER));
    }

    #[tokio::test]
    async fn test_query_string_is_ignored() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("page.html"), "<body>Q</body>").unwrap();
        let state = test_state(temp_dir.path());

        let response = get(&state, "/page.html?v=2").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains(SCRIPT_MARKER));
    }

    #[tokio::test]
    async fn test_html_without_body_close_is_unmodified() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("fragment.html"), "<p>partial</p>").unwrap();
        let state = test_state(temp_dir.path());

        let response = get(&state, "/fragment.html").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "<p>partial</p>");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("bad.html"), b"<body>a\xffb</body>").unwrap();
        let state = test_state(temp_dir.path());

        let body = body_string(get(&state, "/bad.html").await).await;

        assert!(body.starts_with("<body>a\u{fffd}b<script>"));
    }

    #[tokio::test]
    async fn test_non_html_is_served_verbatim() {
        let temp_dir = tempfile::tempdir().unwrap();
        let css = "body { color: red; } /* </body> */";
        fs::write(temp_dir.path().join("site.css"), css).unwrap();
        let state = test_state(temp_dir.path());

        let response = get(&state, "/site.css").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(header_value(&response, header::CONTENT_TYPE).starts_with("text/css"));
        assert_eq!(body_string(response).await, css);
    }

    #[tokio::test]
    async fn test_range_request() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("data.txt"), "0123456789").unwrap();
        let state = test_state(temp_dir.path());

        let response = create_router(state)
            .oneshot(
                Request::get("/data.txt")
                    .header(header::RANGE, "bytes=2-4")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(body_string(response).await, "234");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state = test_state(temp_dir.path());

        assert_eq!(
            get(&state, "/missing.html").await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get(&state, "/missing.js").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_path_traversal_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("src");
        fs::create_dir(&root).unwrap();
        fs::write(temp_dir.path().join("secret.html"), "<body>secret</body>").unwrap();
        fs::write(temp_dir.path().join("secret.txt"), "secret").unwrap();
        let state = test_state(&root);

        for uri in [
            "/../secret.html",
            "/../secret.txt",
            "/%2e%2e/secret.txt",
            "/a/..%2f..%2fsecret.txt",
        ] {
            let response = get(&state, uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            assert!(!body_string(response).await.contains("secret"), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_directory_index_gets_script() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("docs")).unwrap();
        fs::write(temp_dir.path().join("docs/index.html"), "<body>Docs</body>").unwrap();
        let state = test_state(temp_dir.path());

        let body = body_string(get(&state, "/docs/").await).await;

        assert!(body.starts_with("<body>Docs<script>"));
    }

    #[tokio::test]
    async fn test_directory_without_slash_redirects() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("docs")).unwrap();
        let state = test_state(temp_dir.path());

        let response = get(&state, "/docs").await;

        assert!(response.status().is_redirection());
        assert_eq!(header_value(&response, header::LOCATION), "/docs/");
    }

    #[tokio::test]
    async fn test_directory_without_index_is_listed() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("assets")).unwrap();
        fs::write(temp_dir.path().join("assets/app.js"), "let x;").unwrap();
        let state = test_state(temp_dir.path());

        let response = get(&state, "/assets/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Directory listing for /assets/"));
        assert!(body.contains("href=\"app.js\""));
    }

    #[tokio::test]
    async fn test_status_route_rejects_post() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state = test_state(temp_dir.path());
        state.reload.raise();

        let response = create_router(Arc::clone(&state))
            .oneshot(
                Request::post("/reload-status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(state.reload.is_pending());
    }
}
