use lazy_static::lazy_static;
use regex::Regex;

use super::vocab::FOOD_VOCAB;

lazy_static! {
    // Captures the tail of phrases like "with kale and spinach" or
    // "recipes using leftover chicken".
    static ref SCOPED_PATTERN: Regex =
        Regex::new(r"(?:recipes?\s+with|made\s+with|using|with)\s+([a-z ,and-]+)")
            .expect("scoped ingredient pattern");
}

/// Extracts recognized ingredients from a normalized query. Scoped phrases
/// are tried first so "smoothie with kale" does not also pick up vocabulary
/// words outside the phrase; a whole-query substring scan is the fallback.
pub fn extract_ingredients(query: &str) -> Vec<String> {
    let scoped: Vec<String> = SCOPED_PATTERN
        .captures_iter(query)
        .filter_map(|c| c.get(1))
        .flat_map(|m| scan_vocab(m.as_str()))
        .collect();

    let found = if scoped.is_empty() { scan_vocab(query) } else { scoped };

    let mut distinct = Vec::new();
    for item in found {
        if !distinct.contains(&item) {
            distinct.push(item);
        }
    }
    distinct
}

fn scan_vocab(text: &str) -> Vec<String> {
    FOOD_VOCAB
        .iter()
        .filter(|food| text.contains(*food))
        .map(|food| food.to_string())
        .collect()
}
