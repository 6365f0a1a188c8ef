//! Receipt file intake endpoint
//!
//! Accepts a single multipart file under the `file` field and stores it in
//! the authenticated user's namespace. The returned `filePath` is the
//! relative reference a client later attaches to an expense record.

use axum::{
    extract::{Extension, Multipart, State},
    Json,
};
use serde::Serialize;

use crate::error::AppError;

use super::middleware::CurrentUser;
use super::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
}

// =========================================================================
// POST /api/uploadfile
// =========================================================================

/// Store one uploaded file under the caller's namespace
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut stored: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::InvalidRequest(format!("Falha ao processar o upload: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("arquivo").to_string();
        let data = field.bytes().await.map_err(|e| {
            AppError::InvalidRequest(format!("Falha ao ler o arquivo enviado: {}", e))
        })?;

        stored = Some(state.files.store(current.id, &original_name, &data).await?);
        break;
    }

    let file_path = stored.ok_or_else(|| {
        AppError::InvalidRequest("Nenhum arquivo válido foi enviado.".to_string())
    })?;

    tracing::info!(owner = %current.id, path = %file_path, "file stored");

    Ok(Json(UploadResponse {
        message: "Arquivo enviado com sucesso!".to_string(),
        file_path,
    }))
}
