pub mod cache;
pub mod provider;
pub mod service;

pub use cache::{CacheStats, KvCache, MemoryKvCache};
pub use provider::{EmbeddingError, EmbeddingProvider, HttpEmbeddingProvider};
pub use service::EmbeddingService;
