// src/services/cache.rs
// DOCUMENTATION: Response caches for Google Places API calls
// PURPOSE: Reduce API calls by memoizing mapped results

use crate::errors::PlacesError;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Key-value store with per-entry TTL the client memoizes through
pub trait ResponseCache: Send + Sync {
    /// Stored value for `key`, if present and not expired
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<String>>;

    /// Store `value` under `key` for `ttl`
    fn set_with_ttl<'a>(&'a self, key: String, value: String, ttl: Duration) -> BoxFuture<'a, ()>;
}

/// Build the cache key for one call
/// DOCUMENTATION: `places.<operation>.<arguments as JSON>`; identical arguments
/// always give the same key and any difference gives a different one
pub fn cache_key<A: Serialize + ?Sized>(operation: &str, args: &A) -> Result<String, PlacesError> {
    Ok(format!("places.{}.{}", operation, serde_json::to_string(args)?))
}

/// Cache entry with expiration
#[derive(Clone, Debug)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Simple in-memory cache with TTL
/// DOCUMENTATION: Thread-safe cache for mapped API results
pub struct PlacesCache {
    store: Arc<RwLock<HashMap<String, CacheEntry<String>>>>,
    default_ttl: Duration,
}

impl PlacesCache {
    /// Create new cache with default TTL
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            default_ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Get cached value
    /// DOCUMENTATION: An expired entry is evicted on the way out
    pub async fn get(&self, key: &str) -> Option<String> {
        {
            let store = self.store.read().await;

            match store.get(key) {
                Some(entry) if !entry.is_expired() => {
                    log::debug!("Cache HIT for key: {}", key);
                    return Some(entry.data.clone());
                }
                Some(_) => log::debug!("Cache EXPIRED for key: {}", key),
                None => {
                    log::debug!("Cache MISS for key: {}", key);
                    return None;
                }
            }
        }

        let mut store = self.store.write().await;
        // Another writer may have refreshed the entry in between
        if store.get(key).map_or(false, |entry| entry.is_expired()) {
            store.remove(key);
        }

        None
    }

    /// Set cached value with default TTL
    pub async fn set(&self, key: String, value: String) {
        self.set_with_ttl(key, value, self.default_ttl).await;
    }

    /// Set cached value with custom TTL
    pub async fn set_with_ttl(&self, key: String, value: String, ttl: Duration) {
        let mut store = self.store.write().await;
        log::debug!("Cache SET for key: {} (TTL: {}s)", key, ttl.as_secs());
        store.insert(key, CacheEntry::new(value, ttl));
    }

    /// Clear expired entries
    pub async fn cleanup(&self) {
        let mut store = self.store.write().await;
        let before_count = store.len();
        store.retain(|_, entry| !entry.is_expired());
        let after_count = store.len();

        if before_count > after_count {
            log::info!(
                "Cache cleanup: removed {} expired entries ({} remaining)",
                before_count - after_count,
                after_count
            );
        }
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;
        let total = store.len();
        let expired = store.values().filter(|e| e.is_expired()).count();

        CacheStats {
            total_entries: total,
            expired_entries: expired,
            active_entries: total - expired,
        }
    }

    /// Clear all cache entries
    pub async fn clear(&self) {
        let mut store = self.store.write().await;
        let count = store.len();
        store.clear();
        log::info!("Cache cleared: {} entries removed", count);
    }
}

impl ResponseCache for PlacesCache {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<String>> {
        PlacesCache::get(self, key).boxed()
    }

    fn set_with_ttl<'a>(&'a self, key: String, value: String, ttl: Duration) -> BoxFuture<'a, ()> {
        PlacesCache::set_with_ttl(self, key, value, ttl).boxed()
    }
}

/// Cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResponseCache for NoCache {
    fn get<'a>(&'a self, _key: &'a str) -> BoxFuture<'a, Option<String>> {
        futures::future::ready(None).boxed()
    }

    fn set_with_ttl<'a>(&'a self, _key: String, _value: String, _ttl: Duration) -> BoxFuture<'a, ()> {
        futures::future::ready(()).boxed()
    }
}

/// Cache statistics
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub active_entries: usize,
}

/// Seconds between background cleanup runs
pub const CLEANUP_INTERVAL_SECS: u64 = 300;

/// Start background cleanup task
/// DOCUMENTATION: Periodically removes expired entries. The task holds only a
/// weak handle and stops once the cache itself is dropped.
pub fn start_cleanup_task(cache: Arc<PlacesCache>, interval_seconds: u64) -> tokio::task::JoinHandle<()> {
    let cache = Arc::downgrade(&cache);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));

        loop {
            interval.tick().await;
            match cache.upgrade() {
                Some(cache) => cache.cleanup().await,
                None => {
                    log::debug!("Cache dropped, stopping cleanup task");
                    break;
                }
            }
        }
    })
}
