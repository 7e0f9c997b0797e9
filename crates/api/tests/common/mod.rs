//! Shared test harness: builds the full application router against a test
//! database pool and provides JSON request helpers.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

use voyago_api::auth::jwt::JwtConfig;
use voyago_api::config::ServerConfig;
use voyago_api::router::build_app_router;
use voyago_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            token_expiry_hours: 24,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and no cache.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        cache: None,
    };
    build_app_router(state, &config)
}

/// Send a request with an optional JSON body and bearer token; return the
/// status and parsed JSON body (or `Null` for empty bodies).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// Register a fresh user through the API and return their bearer token.
pub async fn register_user(app: &Router, username: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(serde_json::json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "hunter2!",
            "first_name": "Test",
            "last_name": "User",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {json}");
    json["token"].as_str().unwrap().to_string()
}
