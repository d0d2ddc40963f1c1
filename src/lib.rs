pub mod assemble;
pub mod augment;
pub mod config;
pub mod dedupe;
pub mod diversity;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod index;
pub mod model;
pub mod planner;
pub mod safety;
pub mod scoring;

pub use config::RetrievalConfig;
pub use embedding::{EmbeddingProvider, EmbeddingService, HttpEmbeddingProvider, KvCache, MemoryKvCache};
pub use engine::RetrievalEngine;
pub use error::{LadleError, Result};
pub use index::{IndexMatch, IndexQuery, VectorIndex};
pub use model::{Quality, RetrievalContext, RetrievedChunk, UserContext};
pub use planner::{DedupeMode, IntentType, QueryIntent, RetrievalPlan, Strategy};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;
