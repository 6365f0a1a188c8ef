//! Property ("imóvel") endpoints
//!
//! All routes operate on the authenticated owner's properties. Wire field
//! names keep the original Portuguese schema (`nome`, `cep`, `rua`, ...).

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Property;
use crate::error::AppError;
use crate::handlers::{
    CreatePropertyCommand, CreatePropertyHandler, DeletePropertyCommand, DeletePropertyHandler,
};

use super::middleware::CurrentUser;
use super::{AppState, MessageResponse};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rua: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            user_id: property.user_id,
            nome: property.nome,
            cep: property.cep,
            rua: property.rua,
            numero: property.numero,
            bairro: property.bairro,
            cidade: property.cidade,
            estado: property.estado,
            tipo: property.tipo,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

/// Reduced listing used by expense forms (`GET /api/imoveis/nome`)
#[derive(Debug, Serialize)]
pub struct PropertyNameResponse {
    pub id: Uuid,
    pub nome: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePropertyRequest {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub rua: Option<String>,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
}

const PROPERTY_COLUMNS: &str =
    "id, user_id, nome, cep, rua, numero, bairro, cidade, estado, tipo, created_at, updated_at";

// =========================================================================
// GET /api/imoveis
// =========================================================================

/// List the authenticated owner's properties, ordered by name
pub async fn list_properties(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<PropertyResponse>>, AppError> {
    let properties: Vec<Property> = sqlx::query_as(&format!(
        "SELECT {PROPERTY_COLUMNS} FROM properties WHERE user_id = $1 ORDER BY nome ASC"
    ))
    .bind(current.id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(properties.into_iter().map(Into::into).collect()))
}

// =========================================================================
// GET /api/imoveis/nome
// =========================================================================

/// List only id and name of the owner's properties
pub async fn list_property_names(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<PropertyNameResponse>>, AppError> {
    let names: Vec<(Uuid, String)> =
        sqlx::query_as("SELECT id, nome FROM properties WHERE user_id = $1 ORDER BY nome ASC")
            .bind(current.id)
            .fetch_all(&state.pool)
            .await?;

    Ok(Json(
        names
            .into_iter()
            .map(|(id, nome)| PropertyNameResponse { id, nome })
            .collect(),
    ))
}

// =========================================================================
// POST /api/imoveis
// =========================================================================

/// Register a property for the authenticated owner
pub async fn create_property(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<PropertyResponse>), AppError> {
    let nome = request
        .nome
        .ok_or_else(|| AppError::MissingFields(vec!["nome".to_string()]))?;

    let handler = CreatePropertyHandler::new(state.pool.clone());
    let property = handler
        .execute(CreatePropertyCommand {
            owner_email: current.email.clone(),
            nome,
            cep: request.cep,
            rua: request.rua,
            numero: request.numero,
            bairro: request.bairro,
            cidade: request.cidade,
            estado: request.estado,
            tipo: request.tipo,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(property.into())))
}

// =========================================================================
// DELETE /api/imoveis/:id
// =========================================================================

/// Delete a property, refused while expense records still reference it
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let handler = DeletePropertyHandler::new(state.pool.clone());
    handler.execute(DeletePropertyCommand::new(id)).await?;

    Ok(Json(MessageResponse {
        message: "Imóvel excluído com sucesso.".to_string(),
    }))
}
