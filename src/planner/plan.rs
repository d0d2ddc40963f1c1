use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumString};

use crate::model::ContentType;

/// Named retrieval configuration. Selected once per query, immutable after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Catalog,
    Comprehensive,
    Ingredient,
    Filtered,
    Semantic,
}

/// Key used to collapse redundant chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DedupeMode {
    BySku,
    ByUrl,
    Similarity,
}

/// Metadata filters carried on the plan. The fetcher intentionally does not
/// push these down to the index; category fields there are unreliably
/// populated, so filtering happens in later pipeline stages instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanFilters {
    pub content_types: BTreeSet<ContentType>,
    pub product_category: Option<String>,
    pub recipe_category: Option<String>,
}

/// One request's retrieval recipe: what to ask the index and how to trim
/// what comes back. Created by the planner, read-only everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalPlan {
    pub strategy: Strategy,
    pub semantic_query: String,
    pub top_k: usize,
    pub relevance_threshold: f64,
    pub filters: PlanFilters,
    pub dedupe_mode: DedupeMode,
    pub max_results: usize,
    pub boost_terms: Vec<String>,
    pub reasoning: String,
}
