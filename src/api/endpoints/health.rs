//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub diseases_loaded: usize,
    pub chat_enabled: bool,
}

/// `GET /health`: liveness probe plus a summary of what loaded.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        diseases_loaded: ctx.core.knowledge.len(),
        chat_enabled: ctx.core.chat.is_enabled(),
    })
}
