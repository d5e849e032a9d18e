//! API router.
//!
//! Layer stack (outermost → innermost):
//! 1. HTTP trace spans → 2. CORS (answers preflight) → 3. Body size limit

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::config::ServerSettings;
use crate::core_state::CoreState;

/// Build the API router over shared core state.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let cors = cors_layer(&core.settings.server);
    let body_limit = core.settings.server.max_upload_bytes;
    let ctx = ApiContext::new(core);

    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/analyze", post(endpoints::analyze::analyze))
        .route("/analyze_file", post(endpoints::analyze::analyze_file))
        .route("/generate_pdf", post(endpoints::reports::health_report))
        .route("/generate_diet_pdf", post(endpoints::reports::diet_plan))
        .route("/chat", post(endpoints::chat::send))
        .route("/signup", post(endpoints::auth::signup))
        .route("/login", post(endpoints::auth::login))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// `*` anywhere in the allow-list opens CORS to every origin.
fn cors_layer(settings: &ServerSettings) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if settings.cors_allowed_origins.iter().any(|o| o.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = settings
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
