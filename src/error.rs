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
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Unique constraint violated on {field}")]
    UniqueViolation { field: String },
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Not authorized")]
    Unauthorized,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    /// Maps a driver error, lifting unique-constraint failures to `UniqueViolation`
    /// with the offending column name.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                // Postgres: "guests_token_key". SQLite: "UNIQUE constraint failed: guests.token"
                let field = match db_err.constraint() {
                    Some(constraint) => constraint
                        .trim_end_matches("_key")
                        .rsplit('_')
                        .next()
                        .unwrap_or_default()
                        .to_string(),
                    None => db_err
                        .message()
                        .rsplit('.')
                        .next()
                        .unwrap_or_default()
                        .trim()
                        .to_string(),
                };
                return AppError::UniqueViolation { field };
            }
        }
        AppError::Database(e)
    }

    pub fn is_unique_violation_on(&self, column: &str) -> bool {
        matches!(self, AppError::UniqueViolation { field } if field == column)
    }

    /// Message safe to show to an end user.
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Conflict(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Unauthorized => "Not authorized".to_string(),
            AppError::UniqueViolation { .. } => "Resource already exists (duplicate entry)".to_string(),
            AppError::Database(_) | AppError::Render(_) | AppError::Internal | AppError::InternalWithMsg(_) => {
                "Internal error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::UniqueViolation { field } => {
                error!("Unique violation escaped retry handling on {}", field);
                StatusCode::CONFLICT
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Render(msg) => {
                error!("Render error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.public_message()
        }));

        (status, body).into_response()
    }
}
