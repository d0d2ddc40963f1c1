use std::collections::BTreeSet;

use tracing::info;

use crate::model::{ContentType, Quality, RetrievalContext, RetrievedChunk};

/// Truncates to the plan's result budget and summarizes what survived.
/// Quality is advisory metadata for the generator; it never feeds back into
/// retrieval.
pub fn assemble(mut chunks: Vec<RetrievedChunk>, max_results: usize) -> RetrievalContext {
    chunks.truncate(max_results);

    if chunks.is_empty() {
        info!("Assembled empty context (quality=low)");
        return RetrievalContext::empty();
    }

    let total_relevance = chunks.iter().map(|c| c.score).sum::<f64>() / chunks.len() as f64;

    let has_product_info = chunks.iter().any(|c| {
        c.metadata.content_type == ContentType::Product || c.metadata.product_sku.is_some()
    });
    let has_recipes = chunks.iter().any(|c| {
        c.metadata.content_type == ContentType::Recipe || c.metadata.recipe_category.is_some()
    });

    let source_urls: BTreeSet<String> = chunks
        .iter()
        .map(|c| c.metadata.source_url.clone())
        .filter(|u| !u.is_empty())
        .collect();

    let quality = assess_quality(&chunks, total_relevance);

    info!(
        "Assembled context: {} chunks, relevance {:.3}, quality {}",
        chunks.len(),
        total_relevance,
        quality
    );

    RetrievalContext {
        chunks,
        total_relevance,
        has_product_info,
        has_recipes,
        source_urls,
        quality,
    }
}

fn assess_quality(chunks: &[RetrievedChunk], mean: f64) -> Quality {
    let top = chunks.first().map(|c| c.score).unwrap_or(0.0);
    let strong = chunks.iter().filter(|c| c.score > 0.75).count();

    if top > 0.85 && mean > 0.75 && strong >= 2 {
        Quality::High
    } else if top > 0.7 || mean > 0.65 {
        Quality::Medium
    } else {
        Quality::Low
    }
}

#[cfg(test)]
mod tests {
    use crate::model::ChunkMetadata;

    use super::*;

    fn chunk(id: &str, score: f64) -> RetrievedChunk {
        RetrievedChunk {
            id: id.into(),
            score,
            text: String::new(),
            metadata: ChunkMetadata::default(),
        }
    }

    #[test]
    fn test_empty_context_is_low() {
        let ctx = assemble(Vec::new(), 5);
        assert!(ctx.chunks.is_empty());
        assert_eq!(ctx.quality, Quality::Low);
        assert!(!ctx.has_product_info);
        assert!(!ctx.has_recipes);
        assert_eq!(ctx.total_relevance, 0.0);
    }

    #[test]
    fn test_truncates_to_max_results() {
        let chunks = (0..10).map(|i| chunk(&i.to_string(), 0.9 - i as f64 * 0.01)).collect();
        let ctx = assemble(chunks, 5);
        assert_eq!(ctx.chunks.len(), 5);
    }

    #[test]
    fn test_high_quality() {
        let ctx = assemble(vec![chunk("a", 0.9), chunk("b", 0.8)], 5);
        assert_eq!(ctx.quality, Quality::High);
    }

    #[test]
    fn test_medium_on_decent_top_score() {
        let ctx = assemble(vec![chunk("a", 0.72), chunk("b", 0.4)], 5);
        assert_eq!(ctx.quality, Quality::Medium);
    }

    #[test]
    fn test_low_when_everything_weak() {
        let ctx = assemble(vec![chunk("a", 0.6), chunk("b", 0.5)], 5);
        assert_eq!(ctx.quality, Quality::Low);
    }

    #[test]
    fn test_high_needs_two_strong_chunks() {
        // Top and mean clear their bars but only one chunk is above 0.75.
        let ctx = assemble(vec![chunk("a", 0.95), chunk("b", 0.68)], 5);
        assert_eq!(ctx.quality, Quality::Medium);
    }

    #[test]
    fn test_flags_and_urls() {
        let mut product = chunk("p", 0.9);
        product.metadata.content_type = ContentType::Product;
        product.metadata.source_url = "https://ex.com/p".into();
        let mut recipe = chunk("r", 0.8);
        recipe.metadata.recipe_category = Some("smoothies".into());
        recipe.metadata.source_url = "https://ex.com/r".into();

        let ctx = assemble(vec![product, recipe], 5);
        assert!(ctx.has_product_info);
        assert!(ctx.has_recipes);
        assert_eq!(ctx.source_urls.len(), 2);
    }
}
