//! User profile endpoints
//!
//! Profile creation is an internal path used by the identity issuer; the
//! remaining routes operate on the authenticated account. Reading, updating
//! and deleting a profile by id require the path id to match the token id.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ensure_owner, UserProfile};
use crate::error::AppError;
use crate::handlers::{
    ChangePasswordCommand, ChangePasswordHandler, CreateProfileCommand, CreateProfileHandler,
};

use super::middleware::CurrentUser;
use super::{AppState, MessageResponse};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CreateProfileRequest {
    fn into_command(self) -> Result<CreateProfileCommand, AppError> {
        match (self.name, self.email, self.password) {
            (Some(name), Some(email), Some(password)) => {
                Ok(CreateProfileCommand::new(name, email, password))
            }
            (name, email, password) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("name".to_string());
                }
                if email.is_none() {
                    missing.push("email".to_string());
                }
                if password.is_none() {
                    missing.push("password".to_string());
                }
                Err(AppError::MissingFields(missing))
            }
        }
    }
}

/// Profile as exposed to clients — never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateProfileResponse {
    pub message: String,
    pub user: ProfileResponse,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Allow-listed profile update: only the display name is mutable here.
/// Unknown fields in the body are ignored, and email is not updatable.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub data: ProfileResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

const PROFILE_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

// =========================================================================
// POST /api/users/internal
// =========================================================================

/// Create a profile on behalf of the external identity issuer
pub async fn create_profile_internal(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<CreateProfileResponse>), AppError> {
    let command = request.into_command()?;

    let handler = CreateProfileHandler::new(state.pool.clone());
    let profile = handler.execute(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProfileResponse {
            message: "Perfil criado com sucesso.".to_string(),
            user: profile.into(),
        }),
    ))
}

// =========================================================================
// GET /api/users/me
// =========================================================================

/// Resolve the authenticated account by the token's email
pub async fn get_me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<MeResponse>, AppError> {
    let row: Option<(Uuid, String, String)> =
        sqlx::query_as("SELECT id, name, email FROM users WHERE email = $1")
            .bind(&current.email)
            .fetch_optional(&state.pool)
            .await?;

    let (id, name, email) = row.ok_or_else(|| AppError::UserNotFound(current.email.clone()))?;

    Ok(Json(MeResponse { id, name, email }))
}

// =========================================================================
// GET /api/users/byEmail/:email
// =========================================================================

/// Look up a profile by email (used during account linking)
pub async fn get_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile: Option<UserProfile> = sqlx::query_as(&format!(
        "SELECT {PROFILE_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(&email)
    .fetch_optional(&state.pool)
    .await?;

    profile
        .map(|p| Json(p.into()))
        .ok_or(AppError::UserNotFound(email))
}

// =========================================================================
// GET /api/users/:id
// =========================================================================

/// Read the authenticated user's own profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    ensure_owner(id, current.id)?;

    let profile: Option<UserProfile> =
        sqlx::query_as(&format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;

    profile
        .map(|p| Json(p.into()))
        .ok_or_else(|| AppError::UserNotFound(id.to_string()))
}

// =========================================================================
// PUT /api/users/:id
// =========================================================================

/// Update the authenticated user's own profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, AppError> {
    ensure_owner(id, current.id)?;

    let updated: Option<UserProfile> = sqlx::query_as(&format!(
        r#"
        UPDATE users
        SET name = COALESCE($2, name), updated_at = NOW()
        WHERE id = $1
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(request.name.as_deref())
    .fetch_optional(&state.pool)
    .await?;

    let updated = updated.ok_or_else(|| AppError::UserNotFound(id.to_string()))?;

    Ok(Json(UpdateProfileResponse {
        message: "Perfil atualizado com sucesso!".to_string(),
        data: updated.into(),
    }))
}

// =========================================================================
// DELETE /api/users/:id
// =========================================================================

/// Delete the authenticated user's own account
pub async fn delete_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ensure_owner(id, current.id)?;

    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::UserNotFound(id.to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// PUT /api/users/change-password
// =========================================================================

/// Change the authenticated user's password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let handler = ChangePasswordHandler::new(state.pool.clone());

    handler
        .execute(ChangePasswordCommand::new(
            current.email.clone(),
            request.current_password,
            request.new_password,
        ))
        .await?;

    Ok(Json(MessageResponse {
        message: "Senha alterada com sucesso.".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_profile_request_reports_missing_fields() {
        let request: CreateProfileRequest =
            serde_json::from_str(r#"{"name": "Ana Laura"}"#).unwrap();

        match request.into_command() {
            Err(AppError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["email".to_string(), "password".to_string()]);
            }
            other => panic!("Expected MissingFields, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_create_profile_request_complete() {
        let request: CreateProfileRequest = serde_json::from_str(
            r#"{"name": "Ana Laura", "email": "ana@example.com", "password": "123456"}"#,
        )
        .unwrap();

        let command = request.into_command().unwrap();
        assert_eq!(command.name, "Ana Laura");
        assert_eq!(command.email, "ana@example.com");
    }

    #[test]
    fn test_change_password_request_uses_camel_case() {
        let request: ChangePasswordRequest = serde_json::from_str(
            r#"{"currentPassword": "old123", "newPassword": "new456"}"#,
        )
        .unwrap();

        assert_eq!(request.current_password, "old123");
        assert_eq!(request.new_password, "new456");
    }

    #[test]
    fn test_update_profile_request_ignores_unknown_fields() {
        let request: UpdateProfileRequest = serde_json::from_str(
            r#"{"name": "Novo Nome", "email": "hacker@example.com", "role": "admin"}"#,
        )
        .unwrap();

        assert_eq!(request.name.as_deref(), Some("Novo Nome"));
    }
}
