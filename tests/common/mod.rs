//! Common test utilities
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use notagest::api::{routes, AppState};
use notagest::auth::{self, password, Claims};
use notagest::storage::FileStore;
use notagest::Config;

pub const TEST_JWT_SECRET: &str = "notagest-test-secret";
pub const TEST_PASSWORD: &str = "senha123";

pub struct TestApp {
    pub app: Router,
    pub pool: PgPool,
    pub upload_root: PathBuf,
}

/// Build the full application against the database at `DATABASE_URL`.
///
/// Returns `None` when no database is configured, so tests skip instead of
/// failing on machines without Postgres. Tests create their own uniquely
/// named fixtures and never depend on global table state.
pub async fn try_setup() -> Option<TestApp> {
    dotenvy::dotenv().ok();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    let schema_ok = notagest::db::check_schema(&pool)
        .await
        .expect("Failed to check schema");
    assert!(
        schema_ok,
        "Database schema incomplete; apply migrations/0001_initial_schema.sql"
    );

    let upload_root = std::env::temp_dir().join(format!("notagest-test-{}", Uuid::new_v4()));
    tokio::fs::create_dir_all(&upload_root)
        .await
        .expect("Failed to create upload root");

    let config = Config {
        database_url,
        database_max_connections: 5,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiry_hours: 1,
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        upload_dir: upload_root.display().to_string(),
        public_base_url: "http://localhost:5000".to_string(),
    };

    let state = AppState {
        pool: pool.clone(),
        files: FileStore::new(&upload_root),
        config: Arc::new(config),
    };

    Some(TestApp {
        app: routes::app(state),
        pool,
        upload_root,
    })
}

/// Seed a user row and mint a bearer token for it.
/// Returns (user id, email, token).
pub async fn seed_user(pool: &PgPool, name: &str) -> (Uuid, String, String) {
    let id = Uuid::new_v4();
    let email = format!("{}-{}@example.com", name, id.simple());
    let hash = password::hash_password(TEST_PASSWORD).expect("Failed to hash password");

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(&email)
    .bind(&hash)
    .execute(pool)
    .await
    .expect("Failed to seed user");

    let token = auth::generate_token(&Claims::new(id, email.clone(), 1), TEST_JWT_SECRET)
        .expect("Failed to mint token");

    (id, email, token)
}

/// Seed a property row for the given owner. Returns the property id.
pub async fn seed_property(pool: &PgPool, owner: Uuid, nome: &str) -> Uuid {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO properties (id, user_id, nome, created_at, updated_at)
        VALUES ($1, $2, $3, NOW(), NOW())
        "#,
    )
    .bind(id)
    .bind(owner)
    .bind(nome)
    .execute(pool)
    .await
    .expect("Failed to seed property");

    id
}

/// Build a JSON request, optionally authenticated.
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };

    builder.body(body).unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
