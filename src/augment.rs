use tracing::debug;

use crate::model::UserContext;

/// One augmentation rule: a context signal mapped to descriptive tokens.
struct AugmentRule {
    matches: fn(&UserContext) -> bool,
    tokens: &'static [&'static str],
}

fn has(field: &[String], needle: &str) -> bool {
    field.iter().any(|t| t.to_lowercase().contains(needle))
}

// Fixed, deterministically ordered. Earlier rules win slots under the
// token cap.
const AUGMENT_RULES: &[AugmentRule] = &[
    AugmentRule {
        matches: |c| has(&c.health, "diabet"),
        tokens: &["low sugar", "diabetic friendly", "no added sugar"],
    },
    AugmentRule {
        matches: |c| has(&c.health, "pressure") || has(&c.health, "hypertension"),
        tokens: &["low sodium", "heart healthy"],
    },
    AugmentRule {
        matches: |c| has(&c.constraints, "quick") || has(&c.constraints, "time"),
        tokens: &["quick", "fast", "easy"],
    },
    AugmentRule {
        matches: |c| has(&c.audience, "toddler") || has(&c.audience, "baby"),
        tokens: &["baby food", "toddler", "smooth"],
    },
    AugmentRule {
        matches: |c| has(&c.audience, "kid") || has(&c.audience, "child"),
        tokens: &["kid friendly", "family"],
    },
    AugmentRule {
        matches: |c| has(&c.dietary_preferences, "vegan"),
        tokens: &["vegan", "plant based"],
    },
    AugmentRule {
        matches: |c| has(&c.dietary_preferences, "keto"),
        tokens: &["keto", "low carb"],
    },
    AugmentRule {
        matches: |c| has(&c.fitness, "protein") || has(&c.fitness, "muscle"),
        tokens: &["high protein", "post workout"],
    },
    AugmentRule {
        matches: |c| has(&c.budget, "budget") || has(&c.budget, "cheap"),
        tokens: &["budget", "affordable"],
    },
    AugmentRule {
        matches: |c| has(&c.season, "summer"),
        tokens: &["summer", "refreshing"],
    },
    AugmentRule {
        matches: |c| has(&c.season, "winter"),
        tokens: &["winter", "warming"],
    },
];

/// Appends up to `max_tokens` deduplicated context tokens to the semantic
/// query. No-op when the context is empty or nothing matches; the cap keeps
/// query growth bounded.
pub fn augment(base_query: &str, ctx: &UserContext, max_tokens: usize) -> String {
    if ctx.is_empty() {
        return base_query.to_string();
    }

    let mut tokens: Vec<&str> = Vec::new();
    for rule in AUGMENT_RULES {
        if tokens.len() >= max_tokens {
            break;
        }
        if (rule.matches)(ctx) {
            for &token in rule.tokens {
                if tokens.len() >= max_tokens {
                    break;
                }
                if !tokens.contains(&token) {
                    tokens.push(token);
                }
            }
        }
    }

    if tokens.is_empty() {
        return base_query.to_string();
    }

    debug!("Query augmented with {} context tokens", tokens.len());
    format!("{} {}", base_query, tokens.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context_is_noop() {
        assert_eq!(augment("smoothie", &UserContext::default(), 6), "smoothie");
    }

    #[test]
    fn test_diabetes_rule() {
        let ctx = UserContext { health: vec!["type 2 diabetes".into()], ..Default::default() };
        let augmented = augment("smoothie", &ctx, 6);
        assert!(augmented.contains("low sugar"));
        assert!(augmented.contains("diabetic friendly"));
    }

    #[test]
    fn test_token_cap() {
        let ctx = UserContext {
            health: vec!["diabetes".into()],
            constraints: vec!["quick".into()],
            audience: vec!["toddler".into()],
            ..Default::default()
        };
        let augmented = augment("smoothie", &ctx, 6);
        let appended = augmented.trim_start_matches("smoothie ").to_string();
        assert_eq!(appended.split(", ").count(), 6);
        // Cap cuts the toddler rule off entirely.
        assert!(!augmented.contains("toddler"));
    }

    #[test]
    fn test_no_matching_rule_is_noop() {
        let ctx = UserContext { storage: vec!["small freezer".into()], ..Default::default() };
        assert_eq!(augment("smoothie", &ctx, 6), "smoothie");
    }

    #[test]
    fn test_tokens_deduplicated() {
        let ctx = UserContext {
            constraints: vec!["quick".into(), "short on time".into()],
            ..Default::default()
        };
        let augmented = augment("dinner", &ctx, 6);
        assert_eq!(augmented.matches("quick").count(), 1);
    }
}
