//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{path}`      - Short URL redirect (public, read-only)
//! - `GET  /-/health`    - Health check: store PING
//! - anything else       - 400, malformed short path
//!
//! `/-/` can never collide with a short path because `/` is outside the path
//! alphabet.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, redirect_handler, unmatched_path_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and middleware without path normalization.
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        .route("/{path}", get(redirect_handler))
        .route("/-/health", get(health_handler))
        .fallback(unmatched_path_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/go/` resolves like `/go`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_routes(state))
}
