//! API Middleware
//!
//! Bearer-token authentication and request logging.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::auth;
use crate::error::AppError;

use super::AppState;

/// Identity context extracted from a verified bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

// =========================================================================
// Bearer-token authentication middleware
// =========================================================================

/// Validate the `Authorization: Bearer` token and inject [`CurrentUser`]
/// into request extensions. Rejects with 401 before any handler runs.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&headers).map_err(|e| e.into_response())?;

    let claims = auth::decode_token(&token, &state.config.jwt_secret).map_err(|e| {
        AppError::InvalidToken(format!("Token inválido: {}", e)).into_response()
    })?;

    request.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Pull the raw token out of the `Authorization` header.
///
/// Browsers sometimes send the literal string `"null"` when local storage is
/// empty; that is treated the same as an empty token.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AppError::MissingToken)?
        .trim();

    if token.is_empty() || token == "null" {
        return Err(AppError::InvalidToken(
            "Não autorizado, token nulo".to_string(),
        ));
    }

    Ok(token.to_string())
}

// =========================================================================
// Request logging
// =========================================================================

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie"];

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            let masked_value = if SENSITIVE_HEADERS.contains(&name_lower.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.to_string(), masked_value)
        })
        .collect()
}

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let headers = mask_headers_for_logging(request.headers());

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        headers = ?headers,
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_headers_for_logging() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        headers.insert("authorization", "Bearer secret-token".parse().unwrap());

        let masked = mask_headers_for_logging(&headers);

        let auth = masked.iter().find(|(k, _)| k == "authorization");
        let content_type = masked.iter().find(|(k, _)| k == "content-type");

        assert_eq!(auth.unwrap().1, "[REDACTED]");
        assert_eq!(content_type.unwrap().1, "application/json");
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer abc.def.ghi".parse().unwrap());

        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let headers = HeaderMap::new();

        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AppError::MissingToken)
        ));
    }

    #[test]
    fn test_non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Basic dXNlcjpwYXNz".parse().unwrap());

        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AppError::MissingToken)
        ));
    }

    #[test]
    fn test_empty_and_null_tokens_are_rejected() {
        for raw in ["Bearer ", "Bearer null"] {
            let mut headers = HeaderMap::new();
            headers.insert("authorization", raw.parse().unwrap());

            assert!(matches!(
                extract_bearer_token(&headers),
                Err(AppError::InvalidToken(_))
            ));
        }
    }
}
