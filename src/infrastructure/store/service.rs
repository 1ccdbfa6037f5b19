//! Key-value store trait and error types.

use async_trait::async_trait;

/// Errors that can occur while talking to the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (refused, dropped, I/O failure).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A round trip exceeded the configured timeout.
    #[error("Store timeout: {0}")]
    Timeout(String),

    /// The store answered with an error.
    #[error("Store operation error: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal key-value protocol the repository needs.
///
/// Implementations must be safe for concurrent use by many in-flight
/// operations and must bound every round trip with a timeout.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed store
/// - [`crate::infrastructure::store::MemoryStore`] - In-process store for tests and embedding
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` only if `key` does not exist yet.
    ///
    /// Returns `true` if the value was written.
    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Overwrites `value` only if `key` already exists.
    ///
    /// Returns `true` if the value was written.
    async fn set_if_present(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Removes `key`. Returns `true` if a key was removed.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Enumerates every key starting with `prefix` together with its value.
    ///
    /// Order is unspecified. Keys removed while the scan is running may be
    /// missing from the result but never appear with a bogus value.
    async fn scan_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, String)>>;

    /// Checks if the store answers.
    async fn health_check(&self) -> bool;
}
