//! Profile Handlers
//!
//! User profile creation (internal identity-issuance path) and password
//! change.

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::domain::UserProfile;
use crate::error::AppError;

use super::{ChangePasswordCommand, CreateProfileCommand};

// =========================================================================
// CreateProfileHandler
// =========================================================================

/// Handler for profile creation
pub struct CreateProfileHandler {
    pool: PgPool,
}

impl CreateProfileHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the create profile command
    pub async fn execute(&self, command: CreateProfileCommand) -> Result<UserProfile, AppError> {
        // Email is globally unique
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(&command.email)
                .fetch_one(&self.pool)
                .await?;

        if exists {
            return Err(AppError::EmailAlreadyExists);
        }

        let hash = password::hash_password(&command.password).map_err(AppError::Internal)?;

        let profile: UserProfile = sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&command.name)
        .bind(&command.email)
        .bind(&hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // The existence check above races with concurrent registrations;
            // the unique index is the authority.
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::EmailAlreadyExists,
            _ => AppError::Database(e),
        })?;

        tracing::info!(user_id = %profile.id, "profile created");

        Ok(profile)
    }
}

// =========================================================================
// ChangePasswordHandler
// =========================================================================

/// Handler for password changes
pub struct ChangePasswordHandler {
    pool: PgPool,
}

impl ChangePasswordHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the change password command
    pub async fn execute(&self, command: ChangePasswordCommand) -> Result<(), AppError> {
        let row: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, password_hash FROM users WHERE email = $1")
                .bind(&command.email)
                .fetch_optional(&self.pool)
                .await?;

        let (user_id, stored_hash) =
            row.ok_or_else(|| AppError::UserNotFound(command.email.clone()))?;

        let matches = password::verify_password(&command.current_password, &stored_hash)
            .map_err(AppError::Internal)?;

        // A failed check is a rejected request, not an authorization error.
        if !matches {
            return Err(AppError::WrongCurrentPassword);
        }

        let new_hash = password::hash_password(&command.new_password).map_err(AppError::Internal)?;

        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(&new_hash)
            .execute(&self.pool)
            .await?;

        tracing::info!(user_id = %user_id, "password changed");

        Ok(())
    }
}
