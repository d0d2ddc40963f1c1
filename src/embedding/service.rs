use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{LadleError, Result};

use super::cache::KvCache;
use super::provider::EmbeddingProvider;

/// Wraps the external embedding provider with a content-hash cache.
/// Correctness never depends on the cache: read and write failures are
/// swallowed as misses and no-ops, only latency changes.
pub struct EmbeddingService {
    provider: Arc<dyn EmbeddingProvider>,
    cache: Arc<dyn KvCache>,
    ttl: Duration,
}

impl EmbeddingService {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, cache: Arc<dyn KvCache>, ttl_secs: u64) -> Self {
        Self {
            provider,
            cache,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let normalized = normalize(text);
        let key = cache_key(&normalized);

        match self.cache.get(&key).await {
            Ok(Some(vector)) => {
                debug!("Embedding cache HIT for key {}", &key[..12]);
                return Ok(vector);
            }
            Ok(None) => {}
            Err(e) => debug!("Embedding cache read failed, treating as miss: {}", e),
        }

        let vector = self
            .provider
            .embed(&normalized)
            .await
            .map_err(|e| LadleError::Embedding(e.to_string()))?;

        if let Err(e) = self.cache.put(&key, vector.clone(), self.ttl).await {
            warn!("Embedding cache write failed (ignored): {}", e);
        }

        Ok(vector)
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn cache_key(normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    format!("emb:{:x}", hasher.finalize())
}
