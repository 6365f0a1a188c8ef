//! API module
//!
//! Route definitions, DTOs and middleware for the HTTP surface.

pub mod expenses;
pub mod middleware;
pub mod properties;
pub mod routes;
pub mod upload;
pub mod users;

use std::sync::Arc;

use serde::Serialize;
use sqlx::PgPool;

use crate::config::Config;
use crate::storage::FileStore;

/// Shared state injected into every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub files: FileStore,
}

/// Plain `{message}` response body used by several endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
