use chrono::Utc;
use tracing::debug;

use crate::config::RetrievalConfig;
use crate::model::{sort_by_score, RetrievedChunk, UserContext};
use crate::planner::RetrievalPlan;

use super::conflict::conflicting_terms;

/// Drops candidates below the plan threshold, then decays survivors by
/// index age: `max(floor, 1 - days/decay_window)`. A missing or
/// unparseable timestamp decays nothing. The threshold runs before any
/// boost, so boosts re-rank survivors but never rescue a failed candidate.
pub fn threshold_and_freshness(
    mut chunks: Vec<RetrievedChunk>,
    plan: &RetrievalPlan,
    cfg: &RetrievalConfig,
) -> Vec<RetrievedChunk> {
    let before = chunks.len();
    chunks.retain(|c| c.score >= plan.relevance_threshold);
    debug!("Threshold {} kept {}/{}", plan.relevance_threshold, chunks.len(), before);

    for chunk in &mut chunks {
        chunk.score *= freshness_multiplier(chunk.metadata.indexed_at.as_deref(), cfg);
    }

    sort_by_score(&mut chunks);
    chunks
}

fn freshness_multiplier(indexed_at: Option<&str>, cfg: &RetrievalConfig) -> f64 {
    let Some(ts) = indexed_at else { return 1.0 };
    let Ok(indexed) = chrono::DateTime::parse_from_rfc3339(ts) else { return 1.0 };
    let days = (Utc::now() - indexed.with_timezone(&Utc)).num_milliseconds() as f64 / 86_400_000.0;
    (1.0 - days / cfg.freshness_decay_days).max(cfg.freshness_floor)
}

/// Multiplicative boost from distinct term hits:
/// `1 + min(cap, step * distinct_hits)`. Shared by the term, ingredient and
/// cuisine stages so no single signal can dominate.
fn boost_multiplier(haystack: &str, terms: &[String], cfg: &RetrievalConfig) -> f64 {
    let hits = terms
        .iter()
        .filter(|t| !t.is_empty() && haystack.contains(t.as_str()))
        .count();
    1.0 + cfg.boost_cap.min(cfg.boost_step * hits as f64)
}

fn apply_boost(mut chunks: Vec<RetrievedChunk>, terms: &[String], cfg: &RetrievalConfig) -> Vec<RetrievedChunk> {
    if terms.is_empty() {
        return chunks;
    }
    for chunk in &mut chunks {
        chunk.score *= boost_multiplier(&chunk.searchable_text(), terms, cfg);
    }
    sort_by_score(&mut chunks);
    chunks
}

/// Boost on the plan's extracted terms.
pub fn term_boost(chunks: Vec<RetrievedChunk>, plan: &RetrievalPlan, cfg: &RetrievalConfig) -> Vec<RetrievedChunk> {
    let terms: Vec<String> = plan.boost_terms.iter().map(|t| t.to_lowercase()).collect();
    apply_boost(chunks, &terms, cfg)
}

/// Boost on what the user needs to use up, then what they have on hand.
/// Must-use terms come first for emphasis in the logs; the formula itself
/// treats both alike.
pub fn ingredient_boost(chunks: Vec<RetrievedChunk>, ctx: &UserContext, cfg: &RetrievalConfig) -> Vec<RetrievedChunk> {
    let mut terms: Vec<String> = ctx.must_use.iter().map(|t| t.to_lowercase()).collect();
    for item in &ctx.available {
        let item = item.to_lowercase();
        if !terms.contains(&item) {
            terms.push(item);
        }
    }
    if !ctx.must_use.is_empty() {
        debug!("Ingredient boost prioritizing must-use: {}", ctx.must_use.join(", "));
    }
    apply_boost(chunks, &terms, cfg)
}

/// Boost on the user's cuisine and regional tags.
pub fn cuisine_boost(chunks: Vec<RetrievedChunk>, ctx: &UserContext, cfg: &RetrievalConfig) -> Vec<RetrievedChunk> {
    apply_boost(chunks, &ctx.cuisine_tags(), cfg)
}

/// Penalizes chunks contradicting an active constraint (a "quick" user
/// served an overnight marinade). Single fixed multiplier per chunk no
/// matter how many conflicts it contains.
pub fn conflict_penalty(mut chunks: Vec<RetrievedChunk>, ctx: &UserContext, cfg: &RetrievalConfig) -> Vec<RetrievedChunk> {
    let terms = conflicting_terms(&ctx.constraints);
    if terms.is_empty() {
        return chunks;
    }

    for chunk in &mut chunks {
        let haystack = chunk.searchable_text();
        if terms.iter().any(|t| haystack.contains(t)) {
            chunk.score *= cfg.conflict_penalty;
        }
    }

    sort_by_score(&mut chunks);
    chunks
}

#[cfg(test)]
mod tests {
    use crate::model::ChunkMetadata;
    use crate::planner::{plan, IntentType, QueryIntent};

    use super::*;

    fn chunk(id: &str, score: f64, text: &str) -> RetrievedChunk {
        RetrievedChunk {
            id: id.into(),
            score,
            text: text.into(),
            metadata: ChunkMetadata::default(),
        }
    }

    #[test]
    fn test_threshold_drops_low_scores() {
        let p = plan("smoothie ideas", &QueryIntent::default()); // threshold 0.7
        let out = threshold_and_freshness(
            vec![chunk("a", 0.9, ""), chunk("b", 0.6, "")],
            &p,
            &RetrievalConfig::default(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "a");
    }

    #[test]
    fn test_missing_timestamp_no_decay() {
        let p = plan("smoothie ideas", &QueryIntent::default());
        let out = threshold_and_freshness(vec![chunk("a", 0.9, "")], &p, &RetrievalConfig::default());
        assert_eq!(out[0].score, 0.9);
    }

    #[test]
    fn test_stale_chunk_hits_floor() {
        let p = plan("smoothie ideas", &QueryIntent::default());
        let mut c = chunk("a", 0.9, "");
        // Far past the decay window.
        c.metadata.indexed_at = Some("2015-01-01T00:00:00Z".into());
        let out = threshold_and_freshness(vec![c], &p, &RetrievalConfig::default());
        assert!((out[0].score - 0.9 * 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_fresh_chunk_barely_decays() {
        let p = plan("smoothie ideas", &QueryIntent::default());
        let mut c = chunk("a", 0.9, "");
        c.metadata.indexed_at = Some(Utc::now().to_rfc3339());
        let out = threshold_and_freshness(vec![c], &p, &RetrievalConfig::default());
        assert!(out[0].score > 0.89);
    }

    #[test]
    fn test_term_boost_increases_matching_chunk() {
        let p = plan("green smoothie recipes with kale", &QueryIntent::of_type(IntentType::Recipe));
        let out = term_boost(
            vec![chunk("a", 0.8, "a kale and apple smoothie"), chunk("b", 0.8, "mango lassi")],
            &p,
            &RetrievalConfig::default(),
        );
        assert_eq!(out[0].id, "a");
        assert!((out[0].score - 0.8 * 1.15).abs() < 1e-9);
        assert_eq!(out[1].score, 0.8);
    }

    #[test]
    fn test_boost_cap() {
        let cfg = RetrievalConfig::default();
        let terms: Vec<String> = ["a", "b", "c", "d", "e", "f"].iter().map(|s| s.to_string()).collect();
        let m = boost_multiplier("a b c d e f", &terms, &cfg);
        // 6 hits * 0.15 = 0.9, capped at 0.6.
        assert!((m - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_ingredient_boost_counts_distinct_terms() {
        let ctx = UserContext {
            must_use: vec!["spinach".into()],
            available: vec!["banana".into(), "spinach".into()],
            ..Default::default()
        };
        let out = ingredient_boost(
            vec![chunk("a", 0.8, "spinach banana smoothie")],
            &ctx,
            &RetrievalConfig::default(),
        );
        assert!((out[0].score - 0.8 * 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_cuisine_boost() {
        let ctx = UserContext { cuisine: vec!["Thai".into()], ..Default::default() };
        let out = cuisine_boost(vec![chunk("a", 0.8, "thai green curry")], &ctx, &RetrievalConfig::default());
        assert!((out[0].score - 0.8 * 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_conflict_penalty_exact_ratio() {
        let ctx = UserContext { constraints: vec!["quick".into()], ..Default::default() };
        let out = conflict_penalty(
            vec![
                chunk("slow", 0.8, "slow cooker overnight stew"),
                chunk("fast", 0.8, "five minute stir fry"),
            ],
            &ctx,
            &RetrievalConfig::default(),
        );
        let slow = out.iter().find(|c| c.id == "slow").unwrap();
        let fast = out.iter().find(|c| c.id == "fast").unwrap();
        assert!((slow.score / fast.score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_penalty_applied_once_per_chunk() {
        let ctx = UserContext { constraints: vec!["quick".into()], ..Default::default() };
        let out = conflict_penalty(
            vec![chunk("a", 1.0, "overnight slow cooker ferment")],
            &ctx,
            &RetrievalConfig::default(),
        );
        assert!((out[0].score - 0.7).abs() < 1e-9);
    }
}
