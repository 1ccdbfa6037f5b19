#![allow(dead_code)]

use axum_test::TestServer;
use short_url::infrastructure::persistence::DEFAULT_KEY_PREFIX;
use short_url::infrastructure::store::MemoryStore;
use short_url::routes::app_routes;
use short_url::state::AppState;
use std::sync::Arc;

/// Builds state over a fresh in-memory store, returning the store for seeding.
pub fn create_test_state(permanent_redirects: bool) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), permanent_redirects);
    (state, store)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(app_routes(state)).unwrap()
}

/// Writes a mapping straight into the store, as the admin CLI would have.
pub fn seed_short_url(store: &MemoryStore, path: &str, destination: &str) {
    store.insert_raw(format!("{}{}", DEFAULT_KEY_PREFIX, path), destination);
}
