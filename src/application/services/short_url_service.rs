//! Short URL management and resolution service.

use std::sync::Arc;

use crate::domain::entities::ShortUrl;
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::validation::{Field, validate_path};
use crate::error::AppError;
use serde_json::json;

/// Service for managing and resolving short URLs.
///
/// The admin CLI uses the CRUD operations; the redirect handler only calls
/// [`ShortUrlService::resolve`], which never writes.
pub struct ShortUrlService<R: ShortUrlRepository> {
    repository: Arc<R>,
}

impl<R: ShortUrlRepository> ShortUrlService<R> {
    /// Creates a new short URL service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a mapping from `path` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either field is malformed and
    /// [`AppError::AlreadyExists`] if the path is taken.
    pub async fn create(&self, path: &str, destination: &str) -> Result<ShortUrl, AppError> {
        let short_url = ShortUrl::new(path, destination);
        self.repository.create(short_url.clone()).await?;
        Ok(short_url)
    }

    /// Points an existing `path` at a new `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the path was never created.
    pub async fn update(&self, path: &str, destination: &str) -> Result<ShortUrl, AppError> {
        let short_url = ShortUrl::new(path, destination);
        self.repository.update(short_url.clone()).await?;
        Ok(short_url)
    }

    /// Removes the mapping for `path`; see [`ShortUrlRepository::delete`].
    pub async fn delete(&self, path: &str) -> Result<bool, AppError> {
        self.repository.delete(path).await
    }

    /// Looks up a mapping. Absence is `Ok(None)`, not an error.
    pub async fn get(&self, path: &str) -> Result<Option<ShortUrl>, AppError> {
        self.repository.get(path).await
    }

    /// Lists every mapping in store order.
    pub async fn list(&self) -> Result<Vec<ShortUrl>, AppError> {
        self.repository.get_all().await
    }

    /// Resolves an incoming redirect path to its mapping.
    ///
    /// The path shape is checked here, before the repository is consulted,
    /// so malformed requests never cost a store round trip.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed paths,
    /// [`AppError::NotFound`] for unknown ones and
    /// [`AppError::StoreUnavailable`] when the store cannot be reached.
    pub async fn resolve(&self, path: &str) -> Result<ShortUrl, AppError> {
        validate_path(path).map_err(|failures| AppError::invalid_field(Field::Path, failures))?;

        self.repository
            .get(path)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "path": path })))
    }

    /// Checks if the backing store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}
