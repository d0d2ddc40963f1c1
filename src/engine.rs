use std::sync::Arc;

use tracing::{debug, info};

use crate::assemble::assemble;
use crate::augment::augment;
use crate::config::RetrievalConfig;
use crate::dedupe::dedupe;
use crate::diversity::diversify;
use crate::embedding::EmbeddingService;
use crate::error::Result;
use crate::fetch::fetch_candidates;
use crate::index::VectorIndex;
use crate::model::{RetrievalContext, UserContext};
use crate::planner::{plan, QueryIntent};
use crate::safety::filter_dietary;
use crate::scoring::score_pipeline;

/// The full retrieval pipeline behind one call. Request-scoped throughout;
/// the embedding cache inside the service is the only state shared across
/// requests.
pub struct RetrievalEngine {
    embedding: EmbeddingService,
    index: Arc<dyn VectorIndex>,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    pub fn new(embedding: EmbeddingService, index: Arc<dyn VectorIndex>, config: RetrievalConfig) -> Self {
        Self { embedding, index, config }
    }

    /// Planner -> augmenter -> embed -> fetch -> score -> dietary filter ->
    /// dedupe -> diversify -> assemble. Embedding-provider and index errors
    /// propagate; everything downstream of a fetch degrades to a smaller
    /// (possibly empty) context instead of failing.
    pub async fn retrieve(
        &self,
        query: &str,
        intent: &QueryIntent,
        ctx: &UserContext,
    ) -> Result<RetrievalContext> {
        let plan = plan(query, intent);
        info!("Plan: strategy={}, {}", plan.strategy, plan.reasoning);

        let augmented = augment(&plan.semantic_query, ctx, self.config.max_augment_tokens);
        debug!("Semantic query: {}", augmented);

        let vector = self.embedding.embed(&augmented).await?;
        let candidates = fetch_candidates(self.index.as_ref(), &plan, ctx, vector, &self.config).await?;

        let scored = score_pipeline(candidates, &plan, ctx, &self.config);
        let safe = filter_dietary(scored, ctx);
        let unique = dedupe(safe, plan.dedupe_mode, &self.config);
        let diverse = diversify(unique, &self.config);

        Ok(assemble(diverse, plan.max_results))
    }
}
