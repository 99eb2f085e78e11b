use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const AREA_SEARCH_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
pub const PLACE_DETAILS_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Raw key/value store with per-entry expiry. Implementations must be safe to
/// share between concurrent searches.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn put(&self, key: &str, value: String, ttl: Duration);
}

struct CacheEntry {
    value: String,
    expires_at: OffsetDateTime,
}

pub struct InMemoryCacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCacheStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Drops every expired entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.expires_at > self.clock.now() {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) {
        let expires_at = self.clock.now() + ttl;
        self.entries
            .write()
            .await
            .insert(key.to_string(), CacheEntry { value, expires_at });
    }
}

pub fn spawn_cleanup_task(store: Arc<InMemoryCacheStore>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let removed = store.purge_expired().await;
            if removed > 0 {
                info!(removed, "Purged expired cache entries");
            }
        }
    });
}

/// Memoization facade over a [`CacheStore`]. Values are stored as JSON so a
/// hit hands back exactly what was produced on the miss.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
}

impl Cache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Returns the cached value for `key`, or runs `producer` and stores its
    /// `Ok` output for `ttl`. Errors are returned as-is and never stored.
    pub async fn remember<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(raw) = self.store.get(key).await {
            match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(key, "Cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}, due to: {}", key, e);
                }
            }
        }
        debug!(key, "Cache miss");

        let value = producer().await?;
        match serde_json::to_string(&value) {
            Ok(raw) => self.store.put(key, raw, ttl).await,
            Err(e) => warn!("Failed to serialize cache entry {}, due to: {}", key, e),
        }
        Ok(value)
    }
}
