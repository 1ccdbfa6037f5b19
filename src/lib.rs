//! # Short URL
//!
//! Maps short path tokens to destination URLs stored in Redis, with an admin
//! CLI for managing the mappings and an Axum service that answers `GET /{path}`
//! with a redirect.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The `ShortUrl` entity, validation rules and repository trait
//! - **Application Layer** ([`application`]) - Service used by both surfaces
//! - **Infrastructure Layer** ([`infrastructure`]) - Key-value store access and the repository on top of it
//! - **API Layer** ([`api`]) - Redirect and health handlers, middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export URL_SHORTENER_CONNECTION_STRING="127.0.0.1:6379"
//!
//! cargo run --bin admin -- create -d https://golang.org -p go
//! cargo run
//! curl -i http://localhost:3000/go   # 302, Location: https://golang.org
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ShortUrlService;
    pub use crate::domain::entities::ShortUrl;
    pub use crate::domain::repositories::ShortUrlRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::KvShortUrlRepository;
    pub use crate::infrastructure::store::{KeyValueStore, MemoryStore, RedisStore};
    pub use crate::state::AppState;
}
