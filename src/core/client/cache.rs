use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Entries above this count trigger a sweep of expired ones on insert.
const SWEEP_THRESHOLD: usize = 1024;

/// A response body held by the TTL cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedBody {
    pub body: String,
    pub content_type: Option<String>,
}

#[derive(Debug)]
struct CacheEntry {
    value: CachedBody,
    expires_at: Instant,
}

#[derive(Debug)]
pub(crate) struct CacheStore {
    map: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl CacheStore {
    pub(crate) fn new(default_ttl: Duration) -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    pub(crate) async fn get(&self, key: &str) -> Option<CachedBody> {
        let guard = self.map.read().await;
        guard
            .get(key)
            .filter(|entry| Instant::now() <= entry.expires_at)
            .map(|entry| entry.value.clone())
    }

    pub(crate) async fn put(&self, key: &str, value: CachedBody, ttl_override: Option<Duration>) {
        let ttl = ttl_override.unwrap_or(self.default_ttl);
        let now = Instant::now();
        let mut guard = self.map.write().await;
        if guard.len() >= SWEEP_THRESHOLD {
            guard.retain(|_, e| e.expires_at >= now);
        }
        guard.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: now + ttl,
            },
        );
    }
}
