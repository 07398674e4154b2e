//! Chat relay handler.
//!
//! Implements `POST /api/chat`: validates the inbound message, forwards it
//! with the caller-supplied history to the configured provider, and wraps the
//! reply in the `{response, success}` envelope.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::error::{RelayError, Result};
use crate::relay::ChatMessage;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Defaults to empty when absent so a missing field is reported through
    /// the validation path rather than as a deserialization rejection.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub success: bool,
}

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if req.message.trim().is_empty() {
        return Err(RelayError::Validation("No message provided".to_string()));
    }

    let response = state.relay.get_response(&req.message, &req.history).await?;

    Ok(Json(ChatResponse {
        response,
        success: true,
    }))
}
