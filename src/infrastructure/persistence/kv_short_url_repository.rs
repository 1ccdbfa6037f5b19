//! Key-value implementation of the short URL repository.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::ShortUrl;
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::validation::{Field, validate_path};
use crate::error::AppError;
use crate::infrastructure::store::KeyValueStore;

/// Namespace prepended to every path to form its store key.
pub const DEFAULT_KEY_PREFIX: &str = "short-url:";

/// Repository storing each mapping as `prefix + path -> destination`.
///
/// Creation and update rely on the store's conditional single-key writes, so
/// a concurrent create cannot overwrite an existing mapping and an update
/// never resurrects a deleted one. Nothing is cached in-process: every call
/// reflects the store at call time.
pub struct KvShortUrlRepository {
    store: Arc<dyn KeyValueStore>,
    key_prefix: String,
}

impl KvShortUrlRepository {
    /// Creates a repository using [`DEFAULT_KEY_PREFIX`].
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_prefix(store, DEFAULT_KEY_PREFIX)
    }

    /// Creates a repository with a custom key namespace.
    pub fn with_prefix(store: Arc<dyn KeyValueStore>, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    /// Constructs the full store key with namespace prefix.
    fn build_key(&self, path: &str) -> String {
        format!("{}{}", self.key_prefix, path)
    }

    /// Rebuilds a mapping from a stored entry.
    ///
    /// Returns `None` for entries that would not pass validation; those were
    /// not written through this repository and are never handed out.
    fn from_entry(&self, key: &str, destination: String) -> Option<ShortUrl> {
        let path = key.strip_prefix(&self.key_prefix)?;
        let short_url = ShortUrl::new(path, destination);

        match short_url.validate() {
            Ok(()) => Some(short_url),
            Err(errors) => {
                warn!("Ignoring invalid stored entry {}: {}", key, errors);
                None
            }
        }
    }
}

/// Fails fast on a malformed path before any store round trip.
fn check_path(path: &str) -> Result<(), AppError> {
    validate_path(path).map_err(|failures| AppError::invalid_field(Field::Path, failures))
}

#[async_trait]
impl ShortUrlRepository for KvShortUrlRepository {
    async fn create(&self, short_url: ShortUrl) -> Result<(), AppError> {
        short_url.validate()?;

        let key = self.build_key(&short_url.path);
        if !self
            .store
            .set_if_absent(&key, &short_url.destination)
            .await?
        {
            return Err(AppError::already_exists(
                "Short URL already exists",
                json!({ "path": short_url.path }),
            ));
        }

        info!("Created {} -> {}", short_url.path, short_url.destination);
        Ok(())
    }

    async fn update(&self, short_url: ShortUrl) -> Result<(), AppError> {
        short_url.validate()?;

        let key = self.build_key(&short_url.path);
        if !self
            .store
            .set_if_present(&key, &short_url.destination)
            .await?
        {
            return Err(AppError::not_found(
                "Short URL not found",
                json!({ "path": short_url.path }),
            ));
        }

        info!("Updated {} -> {}", short_url.path, short_url.destination);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<bool, AppError> {
        check_path(path)?;

        let removed = self.store.delete(&self.build_key(path)).await?;
        if removed {
            info!("Deleted {}", path);
        } else {
            debug!("Delete {}: nothing to remove", path);
        }

        Ok(removed)
    }

    async fn get(&self, path: &str) -> Result<Option<ShortUrl>, AppError> {
        check_path(path)?;

        let key = self.build_key(path);
        let destination = self.store.get(&key).await?;

        Ok(destination.and_then(|destination| self.from_entry(&key, destination)))
    }

    async fn get_all(&self) -> Result<Vec<ShortUrl>, AppError> {
        let entries = self.store.scan_prefix(&self.key_prefix).await?;
        let total = entries.len();

        let short_urls: Vec<ShortUrl> = entries
            .into_iter()
            .filter_map(|(key, destination)| self.from_entry(&key, destination))
            .collect();

        debug!("Listed {} of {} stored entries", short_urls.len(), total);
        Ok(short_urls)
    }

    async fn health_check(&self) -> bool {
        self.store.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::MemoryStore;

    fn setup() -> (Arc<MemoryStore>, KvShortUrlRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = KvShortUrlRepository::new(store.clone());
        (store, repo)
    }

    #[tokio::test]
    async fn test_key_scheme() {
        let (store, repo) = setup();

        repo.create(ShortUrl::new("go", "https://golang.org"))
            .await
            .unwrap();

        assert_eq!(
            store.get("short-url:go").await.unwrap(),
            Some("https://golang.org".to_string())
        );
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let store = Arc::new(MemoryStore::new());
        let repo = KvShortUrlRepository::with_prefix(store.clone(), "links/");

        repo.create(ShortUrl::new("rs", "https://rust-lang.org"))
            .await
            .unwrap();

        assert!(store.get("links/rs").await.unwrap().is_some());
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_store() {
        let (store, repo) = setup();

        let result = repo.create(ShortUrl::new("a b", "https://a.com")).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));

        let result = repo.update(ShortUrl::new("ok", "relative")).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_validation_precedes_store_errors() {
        let (store, repo) = setup();
        store.set_available(false);

        let result = repo.get("this-is-too-long").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));

        let result = repo.get("fine").await;
        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_get_skips_corrupted_entry() {
        let (store, repo) = setup();
        store.insert_raw("short-url:broken", "not a url");

        assert!(repo.get("broken").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_skips_invalid_and_foreign_keys() {
        let (store, repo) = setup();
        store.insert_raw("short-url:good", "https://example.com");
        store.insert_raw("short-url:", "https://empty-path.com");
        store.insert_raw("short-url:bad", "");
        store.insert_raw("short-url:way-too-long-path", "https://example.com");
        store.insert_raw("other:thing", "https://example.com");

        let all = repo.get_all().await.unwrap();

        assert_eq!(all, vec![ShortUrl::new("good", "https://example.com")]);
    }
}
