pub mod ingredients;
pub mod intent;
pub mod plan;
pub mod rules;
pub mod vocab;

pub use ingredients::extract_ingredients;
pub use intent::{IntentEntities, IntentType, QueryIntent};
pub use plan::{DedupeMode, PlanFilters, RetrievalPlan, Strategy};
pub use rules::{plan, PlanRule, PLAN_RULES};
