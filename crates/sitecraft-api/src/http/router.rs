//! Axum router configuration with middleware. All REST routes live under
//! `/api/v1`, except the direct preview route and the health check
//! (§6.1).

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Builds the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = if state.cors_origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        .route("/drafts", post(handlers::draft::create_draft))
        .route(
            "/drafts/{draftId}",
            get(handlers::draft::get_draft).patch(handlers::draft::update_draft),
        )
        .route("/drafts/{draftId}/preview", get(handlers::preview::get_preview))
        .route("/drafts/{draftId}/commit", post(handlers::commit::commit));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/p/{draftId}", get(handlers::preview::get_direct_preview))
        .route("/health", get(handlers::health::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
