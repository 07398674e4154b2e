use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Provider(_) | RelayError::Http(_) | RelayError::Json(_) => {
                StatusCode::BAD_GATEWAY
            }
        };

        // Upstream error text is passed through verbatim, matching the
        // relay's contract of exposing the raw failure to the caller.
        let body = Json(json!({
            "error": self.to_string(),
            "success": false
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
