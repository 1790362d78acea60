//! Caching layer for upstream documents to reduce API calls

use crate::config::StockConfig;
use cached::{Cached, TimedCache};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key for upstream requests
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Stock symbol, empty for market-wide endpoints
    pub symbol: String,
    /// Upstream endpoint path
    pub endpoint: String,
    /// Remaining query parameters as JSON
    pub params: String,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(symbol: impl Into<String>, endpoint: impl Into<String>, params: impl Serialize) -> Self {
        Self {
            symbol: symbol.into(),
            endpoint: endpoint.into(),
            params: serde_json::to_string(&params).unwrap_or_default(),
        }
    }
}

/// Thread-safe TTL cache of JSON documents
#[derive(Clone)]
pub struct StockCache {
    cache: Arc<RwLock<TimedCache<CacheKey, Value>>>,
}

impl StockCache {
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a live value from the cache
    pub async fn get(&self, key: &CacheKey) -> Option<Value> {
        // TimedCache evicts expired entries on read, so this needs the write lock
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a value into the cache
    pub async fn insert(&self, key: CacheKey, value: Value) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Return the cached value or fetch, store and return a fresh one
    ///
    /// Failed fetches are not cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: CacheKey, fetcher: F) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Value, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!(endpoint = %key.endpoint, symbol = %key.symbol, "Cache hit");
            return Ok(value);
        }

        tracing::debug!(endpoint = %key.endpoint, symbol = %key.symbol, "Cache miss");
        let value = fetcher().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Which tier an upstream endpoint is cached in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTier {
    /// Quotes and trending lists
    Realtime,
    /// Historical price series
    Historical,
    /// Statements, ratios and shareholding
    Fundamental,
}

/// Tiered caches with per-tier TTLs
#[derive(Clone)]
pub struct CacheManager {
    realtime: StockCache,
    historical: StockCache,
    fundamental: StockCache,
}

impl CacheManager {
    /// Create a cache manager with explicit TTLs
    pub fn new(realtime_ttl: Duration, historical_ttl: Duration, fundamental_ttl: Duration) -> Self {
        Self {
            realtime: StockCache::new(realtime_ttl),
            historical: StockCache::new(historical_ttl),
            fundamental: StockCache::new(fundamental_ttl),
        }
    }

    /// Create a cache manager from configuration
    pub fn from_config(config: &StockConfig) -> Self {
        Self::new(
            config.cache_ttl_realtime,
            config.cache_ttl_historical,
            config.cache_ttl_fundamental,
        )
    }

    /// Cache for a tier
    pub fn tier(&self, tier: CacheTier) -> &StockCache {
        match tier {
            CacheTier::Realtime => &self.realtime,
            CacheTier::Historical => &self.historical,
            CacheTier::Fundamental => &self.fundamental,
        }
    }

    /// Clear all tiers
    pub async fn clear_all(&self) {
        self.realtime.clear().await;
        self.historical.clear().await;
        self.fundamental.clear().await;
    }
}
