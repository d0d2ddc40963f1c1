use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::Display;

use super::chunk::RetrievedChunk;

/// Advisory confidence tier for the downstream generator. Never alters
/// retrieval itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    High,
    Medium,
    Low,
}

/// The engine's sole output contract. Downstream must handle any chunk
/// count including zero, and must hedge on `Quality::Low`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalContext {
    pub chunks: Vec<RetrievedChunk>,
    pub total_relevance: f64,
    pub has_product_info: bool,
    pub has_recipes: bool,
    pub source_urls: BTreeSet<String>,
    pub quality: Quality,
}

impl RetrievalContext {
    pub fn empty() -> Self {
        Self {
            chunks: Vec::new(),
            total_relevance: 0.0,
            has_product_info: false,
            has_recipes: false,
            source_urls: BTreeSet::new(),
            quality: Quality::Low,
        }
    }
}
