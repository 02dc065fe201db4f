//! Key/value cache store with per-key expiry.
//!
//! Two implementations of the same `CacheStore` contract: a Redis-backed
//! store for real runs (expiry handled server-side via SETEX) and an
//! in-process store for tests and offline runs (lazy expiry on read). TTL is
//! pure expiry in both; the store is never treated as a size-bounded LRU.

use crate::error::TriageError;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use redis::{aio::ConnectionManager, AsyncCommands};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a key. Expired entries are reported as absent.
    async fn get(&self, key: &str) -> Result<Option<String>, TriageError>;

    /// Write a value with a fresh expiry, replacing any previous entry.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64)
        -> Result<(), TriageError>;
}

/// A shared Redis cache client.
/// Uses a `ConnectionManager` for automatic reconnection and resilience.
#[derive(Clone)]
pub struct RedisCache {
    conn_manager: ConnectionManager,
    redis_url: String,
}

// Manual Debug implementation: ConnectionManager is not Debug.
impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("redis_url", &self.redis_url)
            .field("conn_manager", &"<ConnectionManager instance>")
            .finish()
    }
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, TriageError> {
        info!("Initializing Redis connection manager for URL: {}", redis_url);
        let client = redis::Client::open(redis_url)?;
        let conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            error!("Failed to create Redis ConnectionManager: {}", e);
            TriageError::Cache(format!("Failed to create Redis ConnectionManager: {}", e))
        })?;
        info!("Redis ConnectionManager initialized successfully");
        Ok(Self {
            conn_manager,
            redis_url: redis_url.to_string(),
        })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, TriageError> {
        debug!("Attempting to GET cache for key: {}", key);
        let mut conn = self.conn_manager.clone();
        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!("Cache HIT for key: {}", key);
                Ok(Some(value))
            }
            Ok(None) => {
                debug!("Cache MISS for key: {}", key);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for key {}: {}", key, e);
                Err(TriageError::Cache(format!(
                    "Redis GET error for key {}: {}",
                    key, e
                )))
            }
        }
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<(), TriageError> {
        let mut conn = self.conn_manager.clone();
        match conn.set_ex::<_, _, ()>(key, value, ttl_secs).await {
            Ok(_) => {
                debug!("Cache SETEX success for key: {} with TTL: {}s", key, ttl_secs);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to SETEX key '{}' in Redis: {}", key, e);
                Err(TriageError::Cache(format!(
                    "Redis SETEX error for key {}: {}",
                    key, e
                )))
            }
        }
    }
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

/// In-process cache store with the same expiry semantics as the Redis
/// backend. Entries are checked against their deadline on read, so an
/// expired entry behaves exactly like an absent one.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, TriageError> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                debug!("Cache HIT for key: {}", key);
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => {
                debug!("Cache entry expired for key: {}", key);
            }
            None => {
                debug!("Cache MISS for key: {}", key);
                return Ok(None);
            }
        }
        entries.remove(key);
        Ok(None)
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<(), TriageError> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at: Instant::now() + Duration::from_secs(ttl_secs),
            },
        );
        debug!("Cache SET success for key: {} with TTL: {}s", key, ttl_secs);
        Ok(())
    }
}
