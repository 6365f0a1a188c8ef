//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Campos obrigatórios faltando.")]
    MissingFields(Vec<String>),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Senha atual incorreta.")]
    WrongCurrentPassword,

    #[error("Este imóvel possui notas vinculadas e não pode ser excluído.")]
    PropertyHasLinkedRecords,

    // 401 Unauthorized (authentication)
    #[error("Não autorizado, token não fornecido.")]
    MissingToken,

    #[error("{0}")]
    InvalidToken(String),

    // 403 Forbidden (authenticated, not the owner)
    #[error("Não autorizado")]
    Forbidden,

    // 404 Not Found
    #[error("Usuário não encontrado.")]
    UserNotFound(String),

    #[error("Imóvel não encontrado.")]
    PropertyNotFound(String),

    #[error("Arquivo não encontrado")]
    ExpenseRecordNotFound(String),

    // 409 Conflict
    #[error("Perfil já existe.")]
    EmailAlreadyExists,

    // Server errors (5xx)
    #[error("Erro interno no servidor.")]
    Database(#[from] sqlx::Error),

    #[error("Erro interno no servidor.")]
    Io(#[from] std::io::Error),

    #[error("Erro interno no servidor.")]
    Internal(String),

    #[error("Erro de configuração.")]
    Config(#[from] crate::config::ConfigError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(rename = "validationErrors", skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<String>>,
}

impl AppError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_)
            | AppError::InvalidRequest(_)
            | AppError::WrongCurrentPassword
            | AppError::PropertyHasLinkedRecords => StatusCode::BAD_REQUEST,

            AppError::MissingToken | AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,

            AppError::Forbidden => StatusCode::FORBIDDEN,

            AppError::UserNotFound(_)
            | AppError::PropertyNotFound(_)
            | AppError::ExpenseRecordNotFound(_) => StatusCode::NOT_FOUND,

            AppError::EmailAlreadyExists => StatusCode::CONFLICT,

            AppError::Database(_)
            | AppError::Io(_)
            | AppError::Internal(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for clients
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingFields(_) => "missing_fields",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::WrongCurrentPassword => "wrong_current_password",
            AppError::PropertyHasLinkedRecords => "property_has_linked_records",
            AppError::MissingToken => "missing_token",
            AppError::InvalidToken(_) => "invalid_token",
            AppError::Forbidden => "forbidden",
            AppError::UserNotFound(_) => "user_not_found",
            AppError::PropertyNotFound(_) => "property_not_found",
            AppError::ExpenseRecordNotFound(_) => "expense_record_not_found",
            AppError::EmailAlreadyExists => "email_already_exists",
            AppError::Database(_) => "database_error",
            AppError::Io(_) => "io_error",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (details, validation_errors) = match &self {
            AppError::MissingFields(fields) => (None, Some(fields.clone())),

            AppError::UserNotFound(id)
            | AppError::PropertyNotFound(id)
            | AppError::ExpenseRecordNotFound(id) => (Some(id.clone()), None),

            // 5xx: log the real cause, return a generic message
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (None, None)
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {:?}", e);
                (None, None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (None, None)
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (None, None)
            }

            _ => (None, None),
        };

        let body = ErrorResponse {
            message: self.to_string(),
            error_code: self.error_code().to_string(),
            details,
            validation_errors,
        };

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::MissingFields(vec!["title".into()]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::PropertyNotFound("abc".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::EmailAlreadyExists.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::PropertyHasLinkedRecords.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_missing_fields_lists_field_names() {
        let err = AppError::MissingFields(vec!["title".into(), "value".into()]);
        let body = serde_json::to_value(ErrorResponse {
            message: err.to_string(),
            error_code: err.error_code().to_string(),
            details: None,
            validation_errors: match &err {
                AppError::MissingFields(f) => Some(f.clone()),
                _ => None,
            },
        })
        .unwrap();

        assert_eq!(body["message"], "Campos obrigatórios faltando.");
        assert_eq!(body["validationErrors"][0], "title");
        assert_eq!(body["validationErrors"][1], "value");
    }
}
