use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Every failure the gateway can surface. Client kinds carry their message
/// through to the response body; server kinds are logged in full and answered
/// with a generic body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("LLM refused the request: {0}")]
    Refusal(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider API error: {0}")]
    Upstream(String),

    #[error("Unexpected error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidModel(_) | ApiError::Refusal(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Configuration(_) | ApiError::Upstream(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::Refusal(msg) => json!({ "errors": [msg], "type": "refusal" }),
            ApiError::Validation(msg) | ApiError::InvalidModel(msg) | ApiError::NotFound(msg) => {
                json!({ "errors": [msg] })
            }
            ApiError::Configuration(msg) | ApiError::Upstream(msg) | ApiError::Internal(msg) => {
                tracing::error!(error = %msg, kind = ?status, "server-side failure");
                json!({ "errors": ["Internal server error"] })
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
