//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::domain::validation::{Field, validate_path};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short path to its destination.
///
/// # Endpoint
///
/// `GET /{path}`
///
/// # Request Flow
///
/// 1. Validate the path shape (no store access if malformed)
/// 2. Look up the mapping in the store
/// 3. Return 302 Found (or 301 when permanent redirects are configured)
///
/// The handler is read-only; it never writes to the store.
///
/// # Errors
///
/// - 400 Bad Request if the path is malformed
/// - 404 Not Found if no mapping exists
/// - 503 Service Unavailable if the store cannot be reached
pub async fn redirect_handler(
    Path(path): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let short_url = state.short_url_service.resolve(&path).await?;
    debug!("Redirecting {} -> {}", path, short_url.destination);

    let location = location_header(&short_url.destination)?;

    Ok((state.redirect_status, [(header::LOCATION, location)]).into_response())
}

/// Answers requests that match no route, such as `/` or `/a/b`.
///
/// Anything outside the route table is a malformed short path, so it gets
/// the same 400 body as `/{path}` with a bad path.
pub async fn unmatched_path_handler(uri: Uri) -> AppError {
    let path = uri.path().trim_start_matches('/');

    match validate_path(path) {
        Err(failures) => AppError::invalid_field(Field::Path, failures),
        Ok(()) => AppError::not_found("Short URL not found", json!({ "path": path })),
    }
}

/// Builds the `Location` header for a destination.
///
/// Destinations are sent verbatim when possible; those containing non-ASCII
/// characters fall back to the URL parser's percent-encoded form.
fn location_header(destination: &str) -> Result<HeaderValue, AppError> {
    if let Ok(value) = HeaderValue::from_str(destination) {
        return Ok(value);
    }

    Url::parse(destination)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            AppError::internal(
                "Stored destination cannot be used as a redirect target",
                json!({ "destination": destination }),
            )
        })
}
