//! Redis-backed key-value store.

use super::service::{KeyValueStore, StoreError, StoreResult};
use crate::config::mask_connection_string;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, RedisResult, Value, aio::ConnectionManager};
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Number of keys requested per `SCAN` step and per `MGET` batch.
const SCAN_BATCH: usize = 200;

/// Redis store implementation.
///
/// Uses connection multiplexing via `ConnectionManager`, which is cheap to
/// clone and reconnects on its own after the server goes away. Every round
/// trip is bounded by `timeout`.
pub struct RedisStore {
    client: ConnectionManager,
    timeout: Duration,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `timeout` - Upper bound for connecting and for every later round trip
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid or the
    /// connection cannot be established, [`StoreError::Timeout`] if that
    /// takes longer than `timeout`.
    pub async fn connect(redis_url: &str, timeout: Duration) -> StoreResult<Self> {
        info!("Connecting to Redis at {}", mask_connection_string(redis_url));

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = match tokio::time::timeout(timeout, ConnectionManager::new(client)).await {
            Ok(Ok(manager)) => manager,
            Ok(Err(e)) => {
                return Err(StoreError::Unavailable(format!(
                    "Failed to connect to Redis: {}",
                    e
                )));
            }
            Err(_) => {
                return Err(StoreError::Timeout(format!(
                    "Connecting to Redis took longer than {:?}",
                    timeout
                )));
            }
        };

        let store = Self {
            client: manager,
            timeout,
        };

        let mut conn = store.client.clone();
        store.round_trip("PING", conn.ping::<()>()).await?;

        info!("✓ Connected to Redis");

        Ok(store)
    }

    async fn round_trip<T>(
        &self,
        command: &'static str,
        fut: impl Future<Output = RedisResult<T>>,
    ) -> StoreResult<T> {
        with_timeout(self.timeout, command, fut).await
    }

    /// `SET key value NX|XX`; true when the server reports the write.
    async fn set_conditional(
        &self,
        key: &str,
        value: &str,
        condition: &'static str,
    ) -> StoreResult<bool> {
        let mut conn = self.client.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg(condition);

        let reply = self
            .round_trip("SET", cmd.query_async::<Value>(&mut conn))
            .await?;

        Ok(!matches!(reply, Value::Nil))
    }

    /// Collects every key matching `pattern` with cursor-based `SCAN`.
    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.client.clone();
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let mut cmd = redis::cmd("SCAN");
            cmd.arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH);

            let (next, batch) = self
                .round_trip("SCAN", cmd.query_async::<(u64, Vec<String>)>(&mut conn))
                .await?;

            // SCAN may return a key more than once.
            for key in batch {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.clone();
        let reply = self
            .round_trip("GET", async {
                match redis::cmd("GET").arg(key).query_async::<Value>(&mut conn).await {
                    Err(e) if is_wrong_type(&e) => {
                        warn!("Skipping {}: not a string value", key);
                        Ok(Value::Nil)
                    }
                    other => other,
                }
            })
            .await?;
        let value = decode_value(key, reply);

        debug!(
            "Store GET {}: {}",
            key,
            if value.is_some() { "hit" } else { "miss" }
        );
        Ok(value)
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        self.set_conditional(key, value, "NX").await
    }

    async fn set_if_present(&self, key: &str, value: &str) -> StoreResult<bool> {
        self.set_conditional(key, value, "XX").await
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.client.clone();
        let deleted = self.round_trip("DEL", conn.del::<_, i32>(key)).await?;
        Ok(deleted > 0)
    }

    async fn scan_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, String)>> {
        let keys = self.scan_keys(&scan_pattern(prefix)).await?;
        let mut entries = Vec::with_capacity(keys.len());
        let mut conn = self.client.clone();

        for chunk in keys.chunks(SCAN_BATCH) {
            let mut cmd = redis::cmd("MGET");
            for key in chunk {
                cmd.arg(key);
            }

            let values = self
                .round_trip("MGET", cmd.query_async::<Vec<Value>>(&mut conn))
                .await?;

            // Keys removed between SCAN and MGET come back as nil.
            for (key, value) in chunk.iter().zip(values) {
                if let Some(value) = decode_value(key, value) {
                    entries.push((key.clone(), value));
                }
            }
        }

        Ok(entries)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        self.round_trip("PING", conn.ping::<()>()).await.is_ok()
    }
}

/// Awaits a single Redis command, giving up after `timeout`.
async fn with_timeout<T>(
    timeout: Duration,
    command: &'static str,
    fut: impl Future<Output = RedisResult<T>>,
) -> StoreResult<T> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(map_redis_error),
        Err(_) => Err(StoreError::Timeout(format!(
            "{} took longer than {:?}",
            command, timeout
        ))),
    }
}

/// Turns a `GET`/`MGET` reply into a string value.
///
/// Nil is absent. Non-UTF-8 bytes and non-string replies are logged and
/// treated as absent too.
fn decode_value(key: &str, value: Value) -> Option<String> {
    match value {
        Value::Nil => None,
        Value::BulkString(bytes) => match String::from_utf8(bytes) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Skipping {}: value is not valid UTF-8", key);
                None
            }
        },
        other => {
            warn!("Skipping {}: unexpected reply {:?}", key, other);
            None
        }
    }
}

fn is_wrong_type(e: &RedisError) -> bool {
    e.code() == Some("WRONGTYPE")
}

/// `SCAN MATCH` pattern for every key starting with `prefix`, with glob
/// metacharacters in the prefix matched literally.
fn scan_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}

/// Splits Redis failures into connectivity problems and command errors.
fn map_redis_error(e: RedisError) -> StoreError {
    if e.is_io_error()
        || e.is_connection_refusal()
        || e.is_connection_dropped()
        || e.is_timeout()
    {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Operation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[tokio::test]
    async fn test_round_trip_timeout() {
        let result = with_timeout(
            Duration::from_millis(10),
            "GET",
            std::future::pending::<RedisResult<()>>(),
        )
        .await;

        match result {
            Err(StoreError::Timeout(message)) => assert!(message.starts_with("GET took longer")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_round_trip_passes_reply_through() {
        let result = with_timeout(Duration::from_secs(1), "GET", async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_connection_errors_are_unavailable() {
        let refused = RedisError::from(io::Error::from(io::ErrorKind::ConnectionRefused));
        assert!(matches!(
            map_redis_error(refused),
            StoreError::Unavailable(_)
        ));

        let reset = RedisError::from(io::Error::from(io::ErrorKind::ConnectionReset));
        assert!(matches!(map_redis_error(reset), StoreError::Unavailable(_)));
    }

    #[test]
    fn test_server_errors_are_operation_failures() {
        let wrong_type = redis::make_extension_error(
            "WRONGTYPE".to_string(),
            Some("Operation against a key holding the wrong kind of value".to_string()),
        );
        assert!(is_wrong_type(&wrong_type));
        assert!(matches!(
            map_redis_error(wrong_type),
            StoreError::Operation(_)
        ));

        let refused = RedisError::from(io::Error::from(io::ErrorKind::ConnectionRefused));
        assert!(!is_wrong_type(&refused));
    }

    #[test]
    fn test_decode_value() {
        assert_eq!(
            decode_value("k", Value::BulkString(b"https://a.com".to_vec())),
            Some("https://a.com".to_string())
        );
        assert_eq!(decode_value("k", Value::Nil), None);
        assert_eq!(decode_value("k", Value::BulkString(vec![0xff, 0xfe])), None);
        assert_eq!(decode_value("k", Value::Int(3)), None);
    }

    #[test]
    fn test_scan_pattern_escapes_globs() {
        assert_eq!(scan_pattern("short-url:"), "short-url:*");
        assert_eq!(scan_pattern("a*b?[c]\\"), "a\\*b\\?\\[c\\]\\\\*");
    }
}
