//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// Redirects are the hot path, so responses are logged at `DEBUG`; only
/// 5xx answers (store outages) are raised to `ERROR`.
///
/// # Example Logs
///
/// ```text
/// DEBUG request{method=GET uri=/go version=HTTP/1.1}: finished processing request latency=1 ms status=302
/// ERROR request{method=GET uri=/go version=HTTP/1.1}: response failed classification=Status code: 503 Service Unavailable latency=2000 ms
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::DEBUG)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
