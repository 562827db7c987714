#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use ledgergate_api::config::ServerConfig;
use ledgergate_api::router::build_app_router;
use ledgergate_api::state::AppState;
use ledgergate_mailer::{Mailer, MemoryMailer};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        download_base_url: "http://files.test".to_string(),
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool and a recording mailer.
///
/// This goes through the same [`build_app_router`] as `main.rs`, so
/// integration tests exercise the production middleware stack. The
/// returned [`MemoryMailer`] handle lets tests inspect outbound email
/// and simulate transport failures.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<MemoryMailer>) {
    let config = test_config();
    let mailer = Arc::new(MemoryMailer::new());
    let mailer_dyn: Arc<dyn Mailer> = mailer.clone();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: mailer_dyn,
    };

    (build_app_router(state, &config), mailer)
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body through the router.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
