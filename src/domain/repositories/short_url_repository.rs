//! Repository trait for short URL data access.

use crate::domain::entities::ShortUrl;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short URL mappings.
///
/// Every operation validates its input before touching the store and fails
/// fast with [`AppError::Validation`]. Store connectivity problems surface as
/// [`AppError::StoreUnavailable`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::KvShortUrlRepository`] - key-value store implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_short_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Creates a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if the path is already mapped.
    async fn create(&self, short_url: ShortUrl) -> Result<(), AppError>;

    /// Replaces the destination of an existing mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the path is not mapped.
    async fn update(&self, short_url: ShortUrl) -> Result<(), AppError>;

    /// Removes the mapping for `path`.
    ///
    /// Idempotent: returns `Ok(true)` if a mapping was removed and `Ok(false)`
    /// if there was nothing to remove.
    async fn delete(&self, path: &str) -> Result<bool, AppError>;

    /// Finds the mapping for `path`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortUrl))` if found
    /// - `Ok(None)` if not found
    async fn get(&self, path: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Returns every stored mapping in store enumeration order.
    async fn get_all(&self) -> Result<Vec<ShortUrl>, AppError>;

    /// Checks whether the backing store answers.
    async fn health_check(&self) -> bool;
}
