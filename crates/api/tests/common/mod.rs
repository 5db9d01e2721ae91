use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use findmydoc_db::storage::MemStorage;
use http_body_util::BodyExt;
use tower::ServiceExt;

use findmydoc_api::config::{ServerConfig, StorageBackend};
use findmydoc_api::router::build_app_router;
use findmydoc_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        storage_backend: StorageBackend::Memory,
    }
}

/// Build the full application router over an empty in-memory store.
///
/// This goes through [`build_app_router`], so tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses. The returned `Router` is cheap to clone, and the
/// store is shared across clones.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState {
        storage: Arc::new(MemStorage::new()),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request to the app.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a DELETE request to the app.
pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body to the app.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

/// Send a PUT request with a JSON body to the app.
pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user and return its JSON representation.
pub async fn register_user(app: &Router, username: &str) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/v1/users/register",
        serde_json::json!({
            "username": username,
            "password": "hunter22",
            "email": format!("{username}@example.com"),
            "phone_number": "+258 84 000 0000",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Register a document for the given user and return its JSON representation.
pub async fn register_document(app: &Router, user_id: i64, name: &str) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/v1/documents",
        serde_json::json!({
            "user_id": user_id,
            "type": "id_card",
            "name": name,
            "document_number": format!("DOC-{name}"),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
