use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;

/// External key-value store seam. Implementations may fail freely; the
/// embedding service treats every error as a miss or a dropped write.
#[async_trait]
pub trait KvCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<f32>>, String>;
    async fn put(&self, key: &str, value: Vec<f32>, ttl: Duration) -> Result<(), String>;
}

#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}

/// In-process LRU cache with per-entry TTL. Suitable as the default store
/// when no external cache is wired in.
pub struct MemoryKvCache {
    cache: Mutex<LruCache<String, (Vec<f32>, Instant, Duration)>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryKvCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity.max(1)).unwrap(),
            )),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };
        let cache = self.cache.lock();

        CacheStats {
            hits,
            misses,
            size: cache.len(),
            hit_rate,
        }
    }

    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        cache.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

#[async_trait]
impl KvCache for MemoryKvCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<f32>>, String> {
        let mut cache = self.cache.lock();
        if let Some((value, stored_at, ttl)) = cache.get(key) {
            if stored_at.elapsed() < *ttl {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(value.clone()));
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    async fn put(&self, key: &str, value: Vec<f32>, ttl: Duration) -> Result<(), String> {
        let mut cache = self.cache.lock();
        cache.put(key.to_string(), (value, Instant::now(), ttl));
        Ok(())
    }
}
