// src/services/cache.rs
use log::debug;
use moka::future::Cache;
use std::time::Duration;

// Ten years; moka panics on TTLs over a thousand years.
const MAX_TTL_SECS: u64 = 315_360_000;
pub const DEFAULT_CACHE_CAPACITY: u64 = 1_000;

/// Time-window reuse of upstream response bodies. A zero TTL disables caching.
pub struct FetchCache {
    bodies: Option<Cache<String, String>>,
}

impl FetchCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self::with_capacity(ttl_secs, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(ttl_secs: u64, capacity: u64) -> Self {
        let bodies = (ttl_secs > 0 && capacity > 0).then(|| {
            Cache::builder()
                .max_capacity(capacity)
                .time_to_live(Duration::from_secs(ttl_secs.min(MAX_TTL_SECS)))
                .build()
        });
        FetchCache { bodies }
    }

    pub fn is_enabled(&self) -> bool {
        self.bodies.is_some()
    }

    /// Returns the cached body if it is younger than the TTL.
    pub async fn get(&self, key: &str) -> Option<String> {
        let body = self.bodies.as_ref()?.get(key).await;
        if body.is_some() {
            debug!("Cache hit for {}", key);
        }
        body
    }

    pub async fn insert(&self, key: String, body: String) {
        if let Some(bodies) = &self.bodies {
            bodies.insert(key, body).await;
        }
    }

    /// Live entry count after pending evictions have been applied.
    pub async fn len(&self) -> u64 {
        match &self.bodies {
            Some(bodies) => {
                bodies.run_pending_tasks().await;
                bodies.entry_count()
            }
            None => 0,
        }
    }
}
