//! Best-effort Redis cache for read-heavy endpoints.
//!
//! The cache is strictly a passthrough: every operation logs and swallows
//! Redis errors so a cache outage degrades to database reads instead of
//! failing requests. Values are stored as JSON strings with a TTL.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Default TTL for cached listings, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Key prefix for cached public itinerary pages. Invalidated as
/// `itineraries:public:*` whenever an itinerary mutates.
pub const PUBLIC_ITINERARIES_PREFIX: &str = "itineraries:public";

/// Thin wrapper around a multiplexed Redis connection.
///
/// Cheap to clone; all clones share the underlying connection, which
/// reconnects automatically on failure.
#[derive(Clone)]
pub struct Cache {
    conn: ConnectionManager,
}

impl Cache {
    /// Connect to Redis at the given URL.
    pub async fn connect(url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    /// Fetch and deserialize a cached value. Returns `None` on miss, on a
    /// Redis error, or when the stored payload fails to deserialize.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = match conn.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache read failed");
                return None;
            }
        };
        raw.and_then(|s| serde_json::from_str(&s).ok())
    }

    /// Serialize and store a value with a TTL.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache serialization failed");
                return;
            }
        };
        let mut conn = self.conn.clone();
        if let Err(e) = conn.set_ex::<_, _, ()>(key, payload, ttl_secs).await {
            tracing::warn!(key, error = %e, "Cache write failed");
        }
    }

    /// Delete a single key.
    pub async fn delete(&self, key: &str) {
        let mut conn = self.conn.clone();
        if let Err(e) = conn.del::<_, ()>(key).await {
            tracing::warn!(key, error = %e, "Cache delete failed");
        }
    }

    /// Delete every key matching a glob pattern (e.g. `itineraries:public:*`).
    pub async fn delete_pattern(&self, pattern: &str) {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = match conn.keys(pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(pattern, error = %e, "Cache key scan failed");
                return;
            }
        };
        if keys.is_empty() {
            return;
        }
        if let Err(e) = conn.del::<_, ()>(keys).await {
            tracing::warn!(pattern, error = %e, "Cache invalidation failed");
        }
    }
}

/// Invalidate cached public itinerary pages, if a cache is configured.
pub async fn invalidate_public_itineraries(cache: &Option<Cache>) {
    if let Some(cache) = cache {
        cache
            .delete_pattern(&format!("{PUBLIC_ITINERARIES_PREFIX}:*"))
            .await;
    }
}
