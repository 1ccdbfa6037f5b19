//! Liveness probe for load balancers and orchestrators.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// `GET /-/health`
///
/// Pings the store and answers 200 when it replies, 503 otherwise. The body
/// has the same shape either way:
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": { "store": { "status": "ok", "message": "Store connected" } }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let store = CheckStatus::from_probe(
        state.short_url_service.health_check().await,
        "Store connected",
        "Store did not answer PING",
    );

    let (code, status) = if store.is_ok() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { store },
    };

    (code, Json(body)).into_response()
}
