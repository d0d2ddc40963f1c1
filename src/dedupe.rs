use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::RetrievalConfig;
use crate::model::{sort_by_score, RetrievedChunk};
use crate::planner::DedupeMode;

/// Collapses redundant chunks by the plan's dedupe key.
pub fn dedupe(chunks: Vec<RetrievedChunk>, mode: DedupeMode, cfg: &RetrievalConfig) -> Vec<RetrievedChunk> {
    let before = chunks.len();
    let out = match mode {
        DedupeMode::BySku => dedupe_by_key(chunks, sku_key),
        DedupeMode::ByUrl => dedupe_by_key(chunks, url_key),
        DedupeMode::Similarity => dedupe_by_similarity(chunks, cfg),
    };
    debug!("Dedupe ({}): {} -> {}", mode, before, out.len());
    out
}

/// SKU key, falling back to source URL for chunks with no SKU.
fn sku_key(chunk: &RetrievedChunk) -> String {
    chunk
        .metadata
        .product_sku
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| chunk.metadata.source_url.clone())
}

fn url_key(chunk: &RetrievedChunk) -> String {
    chunk.metadata.source_url.clone()
}

/// One highest-scoring chunk per key. Keyless chunks (empty key) all
/// survive; a missing key never merges unrelated records. Winners keep
/// their input positions so the final stable sort breaks score ties the
/// same way on every run.
fn dedupe_by_key(chunks: Vec<RetrievedChunk>, key: fn(&RetrievedChunk) -> String) -> Vec<RetrievedChunk> {
    let mut out: Vec<RetrievedChunk> = Vec::new();
    let mut slot_by_key: HashMap<String, usize> = HashMap::new();

    for chunk in chunks {
        let k = key(&chunk);
        if k.is_empty() {
            out.push(chunk);
            continue;
        }
        match slot_by_key.get(&k) {
            Some(&slot) => {
                if chunk.score > out[slot].score {
                    out[slot] = chunk;
                }
            }
            None => {
                slot_by_key.insert(k, out.len());
                out.push(chunk);
            }
        }
    }

    sort_by_score(&mut out);
    out
}

/// Greedy pass in score-descending order. Textual near-duplicates (word-set
/// Jaccard above threshold) are dropped; distinct chunks from an
/// already-kept URL are kept but discounted so one page does not crowd the
/// context.
fn dedupe_by_similarity(mut chunks: Vec<RetrievedChunk>, cfg: &RetrievalConfig) -> Vec<RetrievedChunk> {
    sort_by_score(&mut chunks);

    let mut kept: Vec<RetrievedChunk> = Vec::new();
    let mut kept_words: Vec<HashSet<String>> = Vec::new();
    let mut kept_urls: HashSet<String> = HashSet::new();

    for mut chunk in chunks {
        let words = word_set(&chunk.text);
        if kept_words.iter().any(|kw| jaccard(&words, kw) > cfg.jaccard_threshold) {
            continue;
        }

        let url = chunk.metadata.source_url.clone();
        if !url.is_empty() && kept_urls.contains(&url) {
            chunk.score = (chunk.score - cfg.diversity_discount).max(0.0);
        } else if !url.is_empty() {
            kept_urls.insert(url);
        }

        kept_words.push(words);
        kept.push(chunk);
    }

    sort_by_score(&mut kept);
    kept
}

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    intersection / union
}
