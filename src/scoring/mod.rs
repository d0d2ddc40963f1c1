pub mod conflict;
pub mod stages;

use tracing::debug;

use crate::config::RetrievalConfig;
use crate::model::{RetrievedChunk, UserContext};
use crate::planner::RetrievalPlan;

pub use conflict::{conflicting_terms, CONSTRAINT_CONFLICTS};
pub use stages::{conflict_penalty, cuisine_boost, ingredient_boost, term_boost, threshold_and_freshness};

/// Runs the fixed-order scoring pipeline. Every stage is a pure
/// chunks-in/chunks-out function that re-sorts its output, so scores stay
/// comparable throughout.
pub fn score_pipeline(
    chunks: Vec<RetrievedChunk>,
    plan: &RetrievalPlan,
    ctx: &UserContext,
    cfg: &RetrievalConfig,
) -> Vec<RetrievedChunk> {
    let chunks = threshold_and_freshness(chunks, plan, cfg);
    let chunks = term_boost(chunks, plan, cfg);
    let chunks = ingredient_boost(chunks, ctx, cfg);
    let chunks = cuisine_boost(chunks, ctx, cfg);
    let chunks = conflict_penalty(chunks, ctx, cfg);
    debug!("Scoring pipeline: {} chunks survive", chunks.len());
    chunks
}

#[cfg(test)]
mod tests {
    use crate::model::ChunkMetadata;
    use crate::planner::{plan, IntentType, QueryIntent};

    use super::*;

    #[test]
    fn test_pipeline_output_sorted() {
        let p = plan("recipes with kale", &QueryIntent::of_type(IntentType::Recipe));
        let chunks = vec![
            RetrievedChunk { id: "a".into(), score: 0.6, text: "kale chips".into(), metadata: ChunkMetadata::default() },
            RetrievedChunk { id: "b".into(), score: 0.7, text: "plain toast".into(), metadata: ChunkMetadata::default() },
        ];
        let out = score_pipeline(chunks, &p, &UserContext::default(), &RetrievalConfig::default());
        assert!(out.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_zero_survivors_is_valid() {
        let p = plan("smoothie ideas", &QueryIntent::default()); // threshold 0.7
        let chunks = vec![RetrievedChunk {
            id: "a".into(),
            score: 0.2,
            text: String::new(),
            metadata: ChunkMetadata::default(),
        }];
        let out = score_pipeline(chunks, &p, &UserContext::default(), &RetrievalConfig::default());
        assert!(out.is_empty());
    }
}
