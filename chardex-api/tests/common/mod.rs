#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use chardex_api::config::ServerConfig;
use chardex_api::state::AppState;
use chardex_api::{db, router};

/// Build a test `ServerConfig` backed by the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: "memory://".to_string(),
        database_name: "characters".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        unique_names: false,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Goes through the same store setup and middleware stack as `main.rs`.
pub async fn build_test_app(config: ServerConfig) -> Router {
    let store = db::connect(&config).await.unwrap();
    db::ensure_indexes(&store, &config).await.unwrap();

    router::build_app(AppState::new(store))
}

pub async fn default_app() -> Router {
    build_test_app(test_config()).await
}

pub async fn unique_names_app() -> Router {
    build_test_app(ServerConfig {
        unique_names: true,
        ..test_config()
    })
    .await
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> Response {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, Method::POST, uri, &body.to_string()).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, Method::PUT, uri, &body.to_string()).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
