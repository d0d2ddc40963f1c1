use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nearest-neighbor query parameters. `filter` is carried for index
/// implementations that support metadata filtering; the engine sends an
/// empty filter and defers filtering to its own stages.
#[derive(Debug, Clone, Serialize)]
pub struct IndexQuery {
    pub vector: Vec<f32>,
    pub top_k: usize,
    pub filter: Value,
    pub return_metadata: bool,
}

/// One raw match from the index. Metadata is loosely typed on purpose;
/// upstream population is unreliable and the fetcher defaults every field.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexMatch {
    pub id: String,
    pub score: f64,
    #[serde(default)]
    pub metadata: Value,
}

/// External vector search engine seam.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn query(&self, query: IndexQuery) -> Result<Vec<IndexMatch>, String>;
}
