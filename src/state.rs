//! Shared application state injected into HTTP handlers.

use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::services::ShortUrlService;
use crate::infrastructure::persistence::KvShortUrlRepository;
use crate::infrastructure::store::KeyValueStore;

/// State shared by every request handler.
///
/// Cheap to clone; the store connection inside is the only shared resource
/// and is safe for concurrent use.
#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<ShortUrlService<KvShortUrlRepository>>,
    /// Status code used for successful redirects (301 or 302).
    pub redirect_status: StatusCode,
}

impl AppState {
    /// Wires the repository and service on top of `store`.
    pub fn new(store: Arc<dyn KeyValueStore>, permanent_redirects: bool) -> Self {
        let repository = Arc::new(KvShortUrlRepository::new(store));

        Self {
            short_url_service: Arc::new(ShortUrlService::new(repository)),
            redirect_status: if permanent_redirects {
                StatusCode::MOVED_PERMANENTLY
            } else {
                StatusCode::FOUND
            },
        }
    }
}
