use regex::Regex;
use tracing::{debug, info};

use crate::model::{RetrievedChunk, UserContext};

/// Excluded-ingredient sets implied by a named diet.
const DIET_BLACKLISTS: &[(&str, &[&str])] = &[
    ("vegan", &[
        "meat", "chicken", "beef", "pork", "bacon", "fish", "salmon", "tuna",
        "shrimp", "egg", "milk", "cheese", "butter", "yogurt", "cream",
        "honey", "gelatin",
    ]),
    ("vegetarian", &[
        "meat", "chicken", "beef", "pork", "bacon", "fish", "salmon", "tuna",
        "shrimp", "gelatin",
    ]),
    ("keto", &[
        "sugar", "bread", "pasta", "rice", "potato", "flour", "oat", "banana",
    ]),
    ("paleo", &[
        "wheat", "bread", "pasta", "rice", "oat", "bean", "lentil", "peanut",
        "milk", "cheese", "sugar",
    ]),
];

/// Allergen families expanded to their member ingredients.
const ALLERGEN_FAMILIES: &[(&str, &[&str])] = &[
    ("nuts", &[
        "nut", "almond", "walnut", "pecan", "cashew", "pistachio", "hazelnut",
        "macadamia",
    ]),
    ("shellfish", &[
        "shrimp", "prawn", "crab", "lobster", "clam", "mussel", "oyster",
        "scallop",
    ]),
    ("dairy", &["milk", "cheese", "butter", "cream", "yogurt", "whey"]),
    ("gluten", &["wheat", "barley", "rye", "flour", "bread", "pasta"]),
    ("eggs", &["egg", "mayonnaise"]),
];

/// Hard-excludes chunks violating the user's dietary restrictions. This is
/// correctness, not ranking: a walnut recipe never reaches a nut-allergic
/// user regardless of score.
pub fn filter_dietary(chunks: Vec<RetrievedChunk>, ctx: &UserContext) -> Vec<RetrievedChunk> {
    let avoid = build_avoid_terms(ctx);
    if avoid.is_empty() {
        return chunks;
    }

    let matchers: Vec<Regex> = avoid.iter().filter_map(|t| whole_word_matcher(t)).collect();
    let before = chunks.len();

    let kept: Vec<RetrievedChunk> = chunks
        .into_iter()
        .filter(|chunk| {
            let haystack = chunk.searchable_text();
            let violation = matchers.iter().any(|m| m.is_match(&haystack));
            if violation {
                debug!("Dietary filter dropped chunk {}", chunk.id);
            }
            !violation
        })
        .collect();

    if kept.len() < before {
        info!("Dietary filter removed {}/{} chunks", before - kept.len(), before);
    }
    kept
}

/// dietary_avoid terms, diet-implied blacklists, and allergen-family
/// expansions, lowercased and deduplicated.
fn build_avoid_terms(ctx: &UserContext) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    let mut push = |term: &str| {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    };

    for raw in &ctx.dietary_avoid {
        push(raw);
        let lowered = raw.to_lowercase();
        for (family, members) in ALLERGEN_FAMILIES {
            if lowered.contains(family) {
                for member in *members {
                    push(member);
                }
            }
        }
    }

    for pref in &ctx.dietary_preferences {
        let lowered = pref.to_lowercase();
        for (diet, blacklist) in DIET_BLACKLISTS {
            if lowered.contains(diet) {
                for term in *blacklist {
                    push(term);
                }
            }
        }
    }

    terms
}

/// Whole-word, plural-tolerant matcher: "nut" matches "nuts" but not
/// "nutrition".
fn whole_word_matcher(term: &str) -> Option<Regex> {
    Regex::new(&format!(r"\b{}(s|es)?\b", regex::escape(term))).ok()
}
