use serde_json::json;
use tracing::{info, warn};

use crate::config::RetrievalConfig;
use crate::error::{LadleError, Result};
use crate::index::{IndexMatch, IndexQuery, VectorIndex};
use crate::model::{ChunkMetadata, RetrievedChunk, UserContext};
use crate::planner::RetrievalPlan;

/// Issues the single nearest-neighbor query for a request. When dietary
/// filters are active the fetch is doubled (capped) to offset the expected
/// post-filter attrition.
pub async fn fetch_candidates(
    index: &dyn VectorIndex,
    plan: &RetrievalPlan,
    ctx: &UserContext,
    query_vector: Vec<f32>,
    cfg: &RetrievalConfig,
) -> Result<Vec<RetrievedChunk>> {
    let top_k = if ctx.has_dietary_filters() {
        (plan.top_k * 2).min(cfg.fetch_cap)
    } else {
        plan.top_k
    };

    let matches = index
        .query(IndexQuery {
            vector: query_vector,
            top_k,
            filter: metadata_filter(plan),
            return_metadata: true,
        })
        .await
        .map_err(LadleError::Index)?;

    info!("Fetched {} candidates (top_k={})", matches.len(), top_k);
    Ok(matches.into_iter().map(to_chunk).collect())
}

/// Intentionally empty. Category metadata in the index is too unreliably
/// populated to filter on; the scoring and safety stages filter instead.
fn metadata_filter(_plan: &RetrievalPlan) -> serde_json::Value {
    json!({})
}

/// One malformed record must not fail the request; unparseable metadata
/// collapses to defaults.
fn to_chunk(m: IndexMatch) -> RetrievedChunk {
    let metadata = serde_json::from_value::<ChunkMetadata>(m.metadata.clone()).unwrap_or_else(|e| {
        warn!("Defaulting malformed metadata for candidate {}: {}", m.id, e);
        ChunkMetadata::default()
    });

    RetrievedChunk {
        id: m.id,
        score: m.score,
        text: m
            .metadata
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        metadata,
    }
}
