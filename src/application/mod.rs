//! Application layer services.
//!
//! Services consume repository traits and provide the API both surfaces call:
//! the admin CLI and the HTTP redirect handler.
//!
//! # Available Services
//!
//! - [`services::short_url_service::ShortUrlService`] - Short URL management and resolution

pub mod services;
