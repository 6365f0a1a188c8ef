//! API Routes
//!
//! Router assembly: public routes, bearer-protected routes, static file
//! serving for stored receipts, CORS and the JSON 404 fallback.

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::Config;

use super::middleware::{auth_middleware, logging_middleware};
use super::{expenses, properties, upload, users, AppState, MessageResponse};

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let uploads_root = state.files.root().to_path_buf();

    // Routes reachable without a token: internal profile creation (used by
    // the identity issuer) and the email lookup.
    let public = Router::new()
        .route("/api/users/internal", post(users::create_profile_internal))
        .route("/api/users/byEmail/:email", get(users::get_by_email));

    // Everything else requires a verified bearer token.
    let protected = Router::new()
        .route("/api/users/me", get(users::get_me))
        .route("/api/users/change-password", put(users::change_password))
        .route(
            "/api/users/:id",
            get(users::get_profile)
                .put(users::update_profile)
                .delete(users::delete_profile),
        )
        .route(
            "/api/uploads",
            get(expenses::list_expenses).post(expenses::create_expense),
        )
        .route(
            "/api/uploads/:id",
            put(expenses::update_expense).delete(expenses::delete_expense),
        )
        .route(
            "/api/imoveis",
            get(properties::list_properties).post(properties::create_property),
        )
        .route("/api/imoveis/nome", get(properties::list_property_names))
        .route("/api/imoveis/:id", delete(properties::delete_property))
        .route("/api/uploadfile", post(upload::upload_file))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(public)
        .merge(protected)
        // Stored receipts are served directly from disk.
        .nest_service("/uploads", ServeDir::new(uploads_root))
        .fallback(not_found)
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// JSON 404 for unknown routes
async fn not_found() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse {
            message: "Rota não encontrada".to_string(),
        }),
    )
}

/// CORS restricted to the configured origins
fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
