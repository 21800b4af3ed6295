// In-process chart cache.
// Entries carry their insertion time and TTL; expired entries read as absent.
// The store holds at most `capacity` charts and evicts the least recently used.

use std::num::NonZeroUsize;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lru::LruCache;
use tokio::sync::Mutex;

use super::{CacheError, ChartCache};

/// Cached chart with metadata.
#[derive(Debug, Clone)]
struct CachedChart {
    svg: String,
    cached_at: DateTime<Utc>,
    ttl: Duration,
}

impl CachedChart {
    fn new(svg: String, ttl: Duration) -> Self {
        Self {
            svg,
            cached_at: Utc::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed >= self.ttl
    }
}

pub struct MemoryCache {
    entries: Mutex<LruCache<String, CachedChart>>,
}

impl MemoryCache {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Drop every expired entry.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }
        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn capacity(&self) -> usize {
        self.entries.lock().await.cap().get()
    }
}

#[async_trait]
impl ChartCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().await;
        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.svg.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.pop(key);
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        if let Some((evicted, _)) = entries.push(key.to_string(), CachedChart::new(value, ttl)) {
            if evicted != key {
                tracing::debug!("evicted least recently used chart {}", evicted);
            }
        }
        Ok(())
    }
}
