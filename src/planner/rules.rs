use tracing::debug;

use super::ingredients::extract_ingredients;
use super::intent::{IntentType, QueryIntent};
use super::plan::{DedupeMode, PlanFilters, RetrievalPlan, Strategy};
use super::vocab::{
    expand_support_issues, first_synonym, fold_category_keywords, is_catalog_query,
    is_comparison_query,
};

/// Everything a plan rule may look at.
pub struct PlanInput<'a> {
    pub query: &'a str,
    pub intent: &'a QueryIntent,
    pub ingredients: Vec<String>,
}

/// One row of the decision table.
pub struct PlanRule {
    pub name: &'static str,
    pub matches: fn(&PlanInput) -> bool,
    pub build: fn(&PlanInput) -> RetrievalPlan,
}

/// Decision table, evaluated top to bottom, first match wins. The last row
/// always matches.
pub const PLAN_RULES: &[PlanRule] = &[
    PlanRule { name: "catalog", matches: matches_catalog, build: build_catalog },
    PlanRule { name: "comparison", matches: matches_comparison, build: build_comparison },
    PlanRule { name: "ingredient_recipe", matches: matches_ingredient_recipe, build: build_ingredient_recipe },
    PlanRule { name: "generic_recipe", matches: matches_generic_recipe, build: build_generic_recipe },
    PlanRule { name: "support", matches: matches_support, build: build_support },
    PlanRule { name: "single_product", matches: matches_single_product, build: build_single_product },
    PlanRule { name: "default", matches: |_| true, build: build_default },
];

/// Maps a normalized query and its classified intent to a retrieval plan.
/// Pure: same inputs always give the same plan.
pub fn plan(query: &str, intent: &QueryIntent) -> RetrievalPlan {
    let query = query.trim().to_lowercase();
    let ingredients = if intent.entities.ingredients.is_empty() {
        extract_ingredients(&query)
    } else {
        intent.entities.ingredients.iter().map(|i| i.to_lowercase()).collect()
    };

    let input = PlanInput { query: &query, intent, ingredients };

    for rule in PLAN_RULES {
        if (rule.matches)(&input) {
            debug!("Plan rule matched: {}", rule.name);
            return (rule.build)(&input);
        }
    }
    unreachable!("default plan rule always matches")
}

fn matches_catalog(input: &PlanInput) -> bool {
    is_catalog_query(input.query)
        || (input.intent.intent_type == IntentType::Catalog
            && input.intent.entities.products.is_empty())
}

fn build_catalog(input: &PlanInput) -> RetrievalPlan {
    RetrievalPlan {
        strategy: Strategy::Catalog,
        semantic_query: fold_category_keywords(input.query),
        top_k: 50,
        relevance_threshold: 0.5,
        filters: PlanFilters::default(),
        dedupe_mode: DedupeMode::BySku,
        max_results: 12,
        boost_terms: Vec::new(),
        reasoning: "browse-all pattern, wide fetch deduped per product".into(),
    }
}

fn matches_comparison(input: &PlanInput) -> bool {
    is_comparison_query(input.query) || input.intent.intent_type == IntentType::Comparison
}

fn build_comparison(input: &PlanInput) -> RetrievalPlan {
    let entities = &input.intent.entities;
    let semantic_query = if !entities.products.is_empty() {
        entities.products.join(" vs ")
    } else if !entities.goals.is_empty() {
        entities.goals.join(", ")
    } else {
        input.query.to_string()
    };

    RetrievalPlan {
        strategy: Strategy::Comprehensive,
        semantic_query,
        top_k: 30,
        relevance_threshold: 0.5,
        filters: PlanFilters::default(),
        dedupe_mode: DedupeMode::BySku,
        max_results: 10,
        boost_terms: Vec::new(),
        reasoning: "comparison language, broad fetch across compared products".into(),
    }
}

fn matches_ingredient_recipe(input: &PlanInput) -> bool {
    input.intent.intent_type == IntentType::Recipe && !input.ingredients.is_empty()
}

fn build_ingredient_recipe(input: &PlanInput) -> RetrievalPlan {
    RetrievalPlan {
        strategy: Strategy::Ingredient,
        semantic_query: input.query.to_string(),
        top_k: 25,
        relevance_threshold: 0.55,
        filters: PlanFilters::default(),
        dedupe_mode: DedupeMode::ByUrl,
        max_results: 8,
        boost_terms: input.ingredients.clone(),
        reasoning: format!("recipe intent with ingredients: {}", input.ingredients.join(", ")),
    }
}

fn matches_generic_recipe(input: &PlanInput) -> bool {
    input.intent.intent_type == IntentType::Recipe
}

fn build_generic_recipe(input: &PlanInput) -> RetrievalPlan {
    RetrievalPlan {
        strategy: Strategy::Filtered,
        semantic_query: fold_category_keywords(input.query),
        top_k: 20,
        relevance_threshold: 0.6,
        filters: PlanFilters::default(),
        dedupe_mode: DedupeMode::ByUrl,
        max_results: 8,
        boost_terms: Vec::new(),
        reasoning: "recipe intent without recognized ingredients".into(),
    }
}

fn matches_support(input: &PlanInput) -> bool {
    input.intent.intent_type == IntentType::Support
}

fn build_support(input: &PlanInput) -> RetrievalPlan {
    RetrievalPlan {
        strategy: Strategy::Filtered,
        semantic_query: expand_support_issues(input.query),
        top_k: 15,
        relevance_threshold: 0.65,
        filters: PlanFilters::default(),
        dedupe_mode: DedupeMode::ByUrl,
        max_results: 6,
        boost_terms: Vec::new(),
        reasoning: "support intent, issue keywords expanded to troubleshooting terms".into(),
    }
}

fn matches_single_product(input: &PlanInput) -> bool {
    input.intent.entities.products.len() == 1
}

fn build_single_product(input: &PlanInput) -> RetrievalPlan {
    let product = input.intent.entities.products[0].to_lowercase();
    let semantic_query = if input.query.contains(&product) {
        input.query.to_string()
    } else {
        format!("{} {}", product, input.query)
    };

    RetrievalPlan {
        strategy: Strategy::Filtered,
        semantic_query,
        top_k: 15,
        relevance_threshold: 0.6,
        filters: PlanFilters::default(),
        dedupe_mode: DedupeMode::Similarity,
        max_results: 5,
        boost_terms: Vec::new(),
        reasoning: format!("single named product: {}", product),
    }
}

fn build_default(input: &PlanInput) -> RetrievalPlan {
    let semantic_query = match first_synonym(input.query) {
        Some(synonym) => format!("{} {}", input.query, synonym),
        None => input.query.to_string(),
    };

    RetrievalPlan {
        strategy: Strategy::Semantic,
        semantic_query,
        top_k: 10,
        relevance_threshold: 0.7,
        filters: PlanFilters::default(),
        dedupe_mode: DedupeMode::Similarity,
        max_results: 5,
        boost_terms: Vec::new(),
        reasoning: "no specific pattern, narrow semantic search".into(),
    }
}
