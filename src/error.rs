use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("internal error")]
    Internal,
    #[error("upstream service error: {0}")]
    Upstream(String),
}

/// Storage and upstream details never reach the client; they are logged here
/// and replaced by a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(e) => {
                // 2067 = SQLITE_CONSTRAINT_UNIQUE
                let duplicate = e
                    .as_database_error()
                    .and_then(|d| d.code())
                    .map(|code| code == "2067")
                    .unwrap_or(false);

                if duplicate {
                    (StatusCode::CONFLICT, "Resource already exists (duplicate entry)".to_string())
                } else {
                    error!("Database error: {:?}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
                }
            }
            AppError::Upstream(msg) => {
                error!("Upstream service error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Upstream service error".to_string())
            }
            AppError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
