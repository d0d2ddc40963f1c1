/// Fixed food vocabulary scanned during ingredient extraction. Multi-word
/// entries must precede any single-word entry they contain.
pub const FOOD_VOCAB: &[&str] = &[
    "sweet potato", "kale", "spinach", "banana", "strawberry", "blueberry",
    "raspberry", "mango", "pineapple", "avocado", "apple", "orange", "lemon",
    "lime", "ginger", "turmeric", "carrot", "beet", "celery", "cucumber",
    "tomato", "pepper", "onion", "garlic", "broccoli", "cauliflower",
    "zucchini", "pumpkin", "potato", "mushroom", "chicken", "beef", "pork",
    "salmon", "tuna", "shrimp", "egg", "tofu", "chickpea", "lentil", "bean",
    "rice", "quinoa", "oat", "almond", "walnut", "cashew", "peanut",
    "coconut", "chocolate", "vanilla", "cinnamon", "honey", "yogurt", "milk",
    "cheese", "butter", "cream", "basil", "mint", "parsley", "cilantro",
];

/// Category keywords folded into the semantic query text. Hard metadata
/// filters on these categories are unreliable in the index, so the words go
/// into the embedding input instead.
pub const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("blender", "blender kitchen appliance"),
    ("juicer", "juicer kitchen appliance"),
    ("food processor", "food processor kitchen appliance"),
    ("air fryer", "air fryer kitchen appliance"),
    ("mixer", "stand mixer kitchen appliance"),
    ("kettle", "electric kettle kitchen appliance"),
    ("toaster", "toaster kitchen appliance"),
    ("smoothie", "smoothie blended drink"),
    ("soup", "soup recipe"),
    ("dessert", "dessert sweet recipe"),
];

/// One synonym injected for the first recognized keyword under the default
/// strategy.
pub const KEYWORD_SYNONYMS: &[(&str, &str)] = &[
    ("smoothie", "blended drink"),
    ("blend", "mix puree"),
    ("healthy", "nutritious wholesome"),
    ("easy", "simple quick"),
    ("clean", "maintenance care"),
    ("warranty", "guarantee coverage"),
    ("recipe", "how to make"),
    ("breakfast", "morning meal"),
    ("dinner", "evening meal"),
    ("snack", "light bite"),
];

/// Support-issue expansion table. The matched issue keyword is replaced by
/// richer troubleshooting language before embedding.
pub const SUPPORT_ISSUE_SYNONYMS: &[(&str, &str)] = &[
    ("noise", "grinding noise loud sound troubleshooting"),
    ("leak", "leaking seal gasket dripping fix"),
    ("won't turn on", "not starting power button dead troubleshooting"),
    ("not working", "malfunction broken troubleshooting repair"),
    ("smell", "burning smell motor odor troubleshooting"),
    ("blade", "blade dull stuck replacement"),
    ("error", "error code display troubleshooting"),
    ("clean", "cleaning descaling maintenance instructions"),
    ("warranty", "warranty claim registration repair"),
];

/// Browse-all phrasings that force the catalog strategy.
pub const CATALOG_PATTERNS: &[&str] = &[
    "show me all", "show all", "browse", "catalog", "catalogue",
    "full range", "complete range", "what do you sell", "list of",
    "your products", "everything you have",
];

/// Comparison language markers.
pub const COMPARISON_MARKERS: &[&str] = &[
    " vs ", " vs. ", "versus", "compare", "comparison", "difference between",
    "which is better", "or better",
];

pub fn is_catalog_query(query: &str) -> bool {
    query.starts_with("all ") || CATALOG_PATTERNS.iter().any(|p| query.contains(p))
}

pub fn is_comparison_query(query: &str) -> bool {
    COMPARISON_MARKERS.iter().any(|m| query.contains(m))
}

/// Appends category expansions for every category keyword in the query.
pub fn fold_category_keywords(query: &str) -> String {
    let mut folded = query.to_string();
    for (keyword, expansion) in CATEGORY_KEYWORDS {
        if query.contains(keyword) && !folded.contains(expansion) {
            folded.push(' ');
            folded.push_str(expansion);
        }
    }
    folded
}

/// Replaces recognized support-issue keywords with their expansion.
pub fn expand_support_issues(query: &str) -> String {
    let mut expanded = query.to_string();
    for (issue, expansion) in SUPPORT_ISSUE_SYNONYMS {
        if expanded.contains(issue) {
            expanded = expanded.replace(issue, expansion);
        }
    }
    expanded
}

/// First keyword with a known synonym, in table order.
pub fn first_synonym(query: &str) -> Option<&'static str> {
    KEYWORD_SYNONYMS
        .iter()
        .find(|(keyword, _)| query.contains(keyword))
        .map(|(_, synonym)| *synonym)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_detection() {
        assert!(is_catalog_query("all blenders"));
        assert!(is_catalog_query("show me all your juicers"));
        assert!(!is_catalog_query("how do i clean my blender"));
    }

    #[test]
    fn test_comparison_detection() {
        assert!(is_comparison_query("pro5000 vs turbomax"));
        assert!(is_comparison_query("compare the two blenders"));
        assert!(!is_comparison_query("smoothie recipes"));
    }

    #[test]
    fn test_fold_category_keywords() {
        let folded = fold_category_keywords("all blenders");
        assert!(folded.contains("blender kitchen appliance"));
    }

    #[test]
    fn test_support_expansion() {
        let expanded = expand_support_issues("my blender makes a noise");
        assert!(expanded.contains("grinding noise loud sound troubleshooting"));
    }

    #[test]
    fn test_first_synonym_table_order() {
        assert_eq!(first_synonym("healthy smoothie ideas"), Some("blended drink"));
        assert_eq!(first_synonym("nothing matches here"), None);
    }
}
