#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use curio_api::auth::jwt::{issue_token, JwtConfig, Role};
use curio_api::config::ServerConfig;
use curio_api::router::build_app_router;
use curio_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// A valid Bearer token for `user_id`.
pub fn token_for(user_id: i64) -> String {
    issue_token(user_id, Role::User, &test_config().jwt).unwrap()
}

/// A valid Bearer token for a service account such as the match worker.
pub fn service_token(account_id: i64) -> String {
    issue_token(account_id, Role::Service, &test_config().jwt).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, user_id: i64) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", token_for(user_id)))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a raw body so tests can exercise malformed JSON.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    body: impl Into<String>,
    user_id: Option<i64>,
) -> Response {
    send_with_token(app, method, uri, body, user_id.map(token_for)).await
}

pub async fn send_with_token(
    app: Router,
    method: Method,
    uri: &str,
    body: impl Into<String>,
    token: Option<String>,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    send(app, builder.body(Body::from(body.into())).unwrap()).await
}

pub async fn get_service(app: Router, uri: &str, account_id: i64) -> Response {
    send_with_token(app, Method::GET, uri, "", Some(service_token(account_id))).await
}

pub async fn post_service(app: Router, uri: &str, account_id: i64) -> Response {
    send_with_token(app, Method::POST, uri, "{}", Some(service_token(account_id))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    user_id: i64,
) -> Response {
    send_raw(app, Method::POST, uri, body.to_string(), Some(user_id)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    user_id: i64,
) -> Response {
    send_raw(app, Method::PUT, uri, body.to_string(), Some(user_id)).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
