//! Unified Error Handling
//!
//! Provides the application-wide error type and the wire response shapes:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - success envelope for mutating operations
//!
//! Failure responses always carry a single `error` string:
//!
//! ```json
//! { "error": "Pedido não encontrado" }
//! ```
//!
//! Mutating successes carry a `message` plus the affected record:
//!
//! ```json
//! { "message": "Pedido criado com sucesso", "data": { ... } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Success envelope for mutating operations
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Failure body: a single human-readable reason
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication Errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // ========== Authorization Errors (403) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business Logic Errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The row to mutate vanished between the existence check and the
    /// mutation. Surfaced as 404, matching the not-found outcome the caller
    /// would have seen a moment earlier.
    #[error("Resource vanished: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== System Errors (500) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // All credential failures collapse into one 401 body; the enum
            // variants keep the distinction for internal callers and logs.
            AppError::Unauthorized | AppError::TokenExpired | AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token inválido ou expirado".to_string(),
            ),

            // Login path: wrong e-mail and wrong password are told apart
            // neither in status nor in message
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Credenciais inválidas".to_string(),
            ),

            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),

            AppError::NotFound(msg) | AppError::Conflict(msg) => {
                (StatusCode::NOT_FOUND, msg.clone())
            }

            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_string(),
                )
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

// ========== Helper functions ==========

/// Success response with a message and the affected record
pub fn ok_with_message<T: Serialize>(message: impl Into<String>, data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        message: message.into(),
        data: Some(data),
    })
}

/// Success response carrying only a message
pub fn ok_message(message: impl Into<String>) -> Json<AppResponse<()>> {
    Json(AppResponse {
        message: message.into(),
        data: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_share_one_status() {
        for err in [
            AppError::Unauthorized,
            AppError::TokenExpired,
            AppError::InvalidToken,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn conflict_is_reported_as_not_found() {
        let response = AppError::conflict("Pedido não encontrado").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_detail_never_reaches_the_status_line() {
        let response = AppError::database("secret detail").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
