#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use lendhub_api::config::ServerConfig;
use lendhub_api::router::build_app_router;
use lendhub_api::state::AppState;
use lendhub_core::engine::BookingEngine;
use lendhub_core::index::AvailabilityIndex;
use lendhub_core::store::MemoryStore;
use lendhub_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router on the in-memory backend.
///
/// Mirrors the wiring in `main.rs` (same middleware stack, same engine and
/// index construction) so the tests exercise exactly what production runs,
/// minus PostgreSQL.
pub fn build_test_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    let index = Arc::new(AvailabilityIndex::new());
    let engine = Arc::new(BookingEngine::new(
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    let config = test_config();
    let state = AppState {
        users: store.clone(),
        items: store,
        engine,
        index,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Issue one request against the app. `user` fills the
/// `X-Sharer-User-Id` header when present.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<DbId>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user {
        builder = builder.header("X-Sharer-User-Id", id.to_string());
    }
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, user: Option<DbId>) -> Response {
    request(app, Method::GET, uri, user, None).await
}

pub async fn post(app: &Router, uri: &str, user: Option<DbId>, body: Value) -> Response {
    request(app, Method::POST, uri, user, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, user: Option<DbId>, body: Option<Value>) -> Response {
    request(app, Method::PATCH, uri, user, body).await
}

pub async fn delete(app: &Router, uri: &str, user: Option<DbId>) -> Response {
    request(app, Method::DELETE, uri, user, None).await
}

/// Decode a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Scenario helpers
// ---------------------------------------------------------------------------

/// Create a user and return its id.
pub async fn create_user(app: &Router, name: &str, email: &str) -> DbId {
    let response = post(app, "/users", None, json!({ "name": name, "email": email })).await;
    assert_eq!(response.status(), 201, "user creation failed");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create an item owned by `owner` and return its id.
pub async fn create_item(
    app: &Router,
    owner: DbId,
    name: &str,
    description: &str,
    available: bool,
) -> DbId {
    let response = post(
        app,
        "/items",
        Some(owner),
        json!({ "name": name, "description": description, "available": available }),
    )
    .await;
    assert_eq!(response.status(), 201, "item creation failed");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Request a booking and return the whole response.
pub async fn book(
    app: &Router,
    booker: DbId,
    item: DbId,
    start: chrono::DateTime<chrono::Utc>,
    end: chrono::DateTime<chrono::Utc>,
) -> Response {
    post(
        app,
        "/bookings",
        Some(booker),
        json!({
            "item_id": item,
            "start": start.to_rfc3339(),
            "end": end.to_rfc3339(),
        }),
    )
    .await
}
