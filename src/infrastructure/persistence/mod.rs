//! Repository implementations backed by a [`KeyValueStore`](crate::infrastructure::store::KeyValueStore).
//!
//! # Repositories
//!
//! - [`KvShortUrlRepository`] - Short URL storage and retrieval

pub mod kv_short_url_repository;

pub use kv_short_url_repository::{DEFAULT_KEY_PREFIX, KvShortUrlRepository};
