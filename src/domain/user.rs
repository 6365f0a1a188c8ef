//! User account row

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A user account as stored in the `users` table.
///
/// `password_hash` is a PHC-format Argon2id string and must never be
/// serialized into a response body.
#[derive(Debug, Clone, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
