use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Content classification carried in index metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString, Default)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Product,
    Recipe,
    Article,
    Support,
    #[default]
    #[strum(serialize = "unknown")]
    #[serde(other)]
    Unknown,
}

/// Metadata attached to a retrieved passage. Every field tolerates absence;
/// a record with missing fields is defaulted, never rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub page_title: String,
    #[serde(default)]
    pub product_sku: Option<String>,
    #[serde(default)]
    pub product_category: Option<String>,
    #[serde(default)]
    pub recipe_category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub indexed_at: Option<String>,
}

/// A retrieved passage with its relevance score. The score is the only
/// field the pipeline mutates; identity stays with `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub id: String,
    pub score: f64,
    pub text: String,
    #[serde(default)]
    pub metadata: ChunkMetadata,
}

impl RetrievedChunk {
    /// Lowercased text + title, the haystack every lexical stage scans.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.text, self.metadata.page_title).to_lowercase()
    }
}

/// Sort descending by score. Ties keep the prior relative order.
pub fn sort_by_score(chunks: &mut [RetrievedChunk]) {
    chunks.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
}
