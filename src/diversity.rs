use std::collections::HashMap;

use tracing::debug;

use crate::config::RetrievalConfig;
use crate::model::{sort_by_score, RetrievedChunk};

/// Caps per-source and per-category representation so one page or one
/// category cannot monopolize the context. Diversity is a soft preference:
/// deferred chunks backfill whenever capping would shrink the result below
/// min(floor, available).
pub fn diversify(chunks: Vec<RetrievedChunk>, cfg: &RetrievalConfig) -> Vec<RetrievedChunk> {
    if chunks.len() <= cfg.diversity_skip_at {
        return chunks;
    }

    let total = chunks.len();
    let mut per_source: HashMap<String, usize> = HashMap::new();
    let mut per_category: HashMap<String, usize> = HashMap::new();
    let mut admitted: Vec<RetrievedChunk> = Vec::new();
    let mut deferred: Vec<RetrievedChunk> = Vec::new();

    for chunk in chunks {
        let source = chunk.metadata.source_url.clone();
        let category = category_key(&chunk);

        let source_full = !source.is_empty()
            && per_source.get(&source).copied().unwrap_or(0) >= cfg.max_per_source;
        let category_full = category
            .as_ref()
            .is_some_and(|c| per_category.get(c).copied().unwrap_or(0) >= cfg.max_per_category);

        if source_full || category_full {
            deferred.push(chunk);
            continue;
        }

        if !source.is_empty() {
            *per_source.entry(source).or_insert(0) += 1;
        }
        if let Some(c) = category {
            *per_category.entry(c).or_insert(0) += 1;
        }
        admitted.push(chunk);
    }

    let floor = cfg.diversity_floor.min(total);
    if admitted.len() < floor {
        let backfill = floor - admitted.len();
        debug!("Diversity backfilling {} chunks to reach floor {}", backfill, floor);
        admitted.extend(deferred.into_iter().take(backfill));
        sort_by_score(&mut admitted);
    }

    admitted
}

fn category_key(chunk: &RetrievedChunk) -> Option<String> {
    chunk
        .metadata
        .product_category
        .clone()
        .or_else(|| chunk.metadata.recipe_category.clone())
        .filter(|c| !c.is_empty())
}
