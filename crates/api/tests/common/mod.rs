#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use clubhub_api::auth::jwt::{generate_token, JwtConfig};
use clubhub_api::auth::password::hash_password;
use clubhub_api::config::{ServerConfig, UploadConfig};
use clubhub_api::router::build_app_router;
use clubhub_api::state::AppState;
use clubhub_api::storage::{BlobStore, StorageError};
use clubhub_db::models::user::{CreateUser, User};
use clubhub_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "club-password-1";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            expiry_mins: 60,
        },
        uploads: UploadConfig {
            dir: std::env::temp_dir().join("clubhub-test-uploads"),
            public_base_url: "/uploads".to_string(),
            max_bytes: 1024,
        },
        bootstrap_admin: None,
    }
}

/// Blob store that keeps uploads in memory so tests can inspect them.
#[derive(Default)]
pub struct MemoryBlobStore {
    pub blobs: Mutex<Vec<(String, Vec<u8>)>>,
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, bytes: &[u8], extension: &str) -> Result<String, StorageError> {
        let mut blobs = self.blobs.lock().unwrap();
        let url = format!("/uploads/blob-{}.{extension}", blobs.len() + 1);
        blobs.push((url.clone(), bytes.to_vec()));
        Ok(url)
    }
}

/// Build the full application router over `pool`, with the same middleware
/// stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_store(pool, Arc::new(MemoryBlobStore::default()))
}

pub fn build_test_app_with_store(pool: PgPool, blobs: Arc<MemoryBlobStore>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        blobs,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] directly through the repository.
pub async fn create_user(pool: &PgPool, student_id: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            student_id: student_id.to_string(),
            name: format!("User {student_id}"),
            email: format!("{}@college.edu", student_id.to_lowercase()),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

pub fn token_for(user: &User) -> String {
    generate_token(user.id, &user.role, &test_config().jwt).unwrap()
}

/// Create an admin account and return its bearer token.
pub async fn admin_token(pool: &PgPool) -> String {
    let admin = create_user(pool, "ADM1", "admin").await;
    token_for(&admin)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn delete_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures through the API
// ---------------------------------------------------------------------------

/// Create an event as admin and return its id.
pub async fn create_event(app: Router, token: &str, title: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/events",
        serde_json::json!({ "title": title, "date": "2025-03-01", "location": "Main Hall" }),
        token,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a member as admin and return its id.
pub async fn create_member(app: Router, token: &str, name: &str, code: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/members",
        serde_json::json!({
            "name": name,
            "email": format!("{}@club.edu", code.to_lowercase()),
            "student_id": code,
            "picture_url": format!("/uploads/{code}.png"),
            "phone_number": "9876543210",
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
