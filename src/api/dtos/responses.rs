use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::error;

use crate::domain::models::auth::UserProfile;
use crate::domain::services::invitation_service::InvitationSummary;
use crate::error::AppError;

/// Envelope returned by every `/actions` endpoint. Domain failures still answer 200 and
/// carry `success: false` with a user-facing message.
#[derive(Debug)]
pub struct ActionResult(Result<Map<String, Value>, ActionFailure>);

#[derive(Debug)]
struct ActionFailure {
    error: String,
    code: Option<u16>,
}

impl ActionResult {
    pub fn done() -> Self {
        ActionResult(Ok(Map::new()))
    }

    pub fn with<T: Serialize>(key: &str, data: T) -> Self {
        let mut body = Map::new();
        match serde_json::to_value(data) {
            Ok(value) => {
                body.insert(key.to_string(), value);
                ActionResult(Ok(body))
            }
            Err(e) => {
                error!("Action payload serialization failed: {}", e);
                Self::failed("Internal error")
            }
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        ActionResult(Err(ActionFailure { error: message.into(), code: None }))
    }

    pub fn unauthorized() -> Self {
        ActionResult(Err(ActionFailure {
            error: AppError::Unauthorized.public_message(),
            code: Some(StatusCode::UNAUTHORIZED.as_u16()),
        }))
    }

    /// Domain errors keep their message; anything internal is logged and replaced by
    /// `fallback`.
    pub fn from_error(e: AppError, fallback: &str) -> Self {
        match e {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => Self::failed(msg),
            AppError::Unauthorized => Self::unauthorized(),
            other => {
                error!("Action failed: {:?}", other);
                Self::failed(fallback)
            }
        }
    }
}

impl IntoResponse for ActionResult {
    fn into_response(self) -> Response {
        let body = match self.0 {
            Ok(mut data) => {
                data.insert("success".into(), Value::Bool(true));
                Value::Object(data)
            }
            Err(ActionFailure { error, code: Some(code) }) => json!({ "success": false, "error": error, "code": code }),
            Err(ActionFailure { error, code: None }) => json!({ "success": false, "error": error }),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub user: Option<UserProfile>,
    pub invitations: Vec<InvitationSummary>,
}
