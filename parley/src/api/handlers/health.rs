use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// The configured provider selector, or "not configured" when
    /// `AI_PROVIDER` was never set.
    pub provider: String,
}

/// `GET /api/health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        provider: state.config.provider.display_name(),
    })
}
