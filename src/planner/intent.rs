use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Classification supplied by the upstream routing layer. The planner only
/// consumes it; producing it is out of scope here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IntentType {
    Recipe,
    Comparison,
    Support,
    Product,
    Catalog,
    #[default]
    General,
}

/// Entities the upstream classifier pulled out of the query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentEntities {
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryIntent {
    #[serde(default)]
    pub intent_type: IntentType,
    #[serde(default)]
    pub entities: IntentEntities,
}

impl QueryIntent {
    pub fn of_type(intent_type: IntentType) -> Self {
        Self { intent_type, ..Default::default() }
    }
}
