use serde::{Deserialize, Serialize};

/// Free-text signals about the requesting user. Callers populate whatever
/// they know; every field defaults to empty and "absent" and "empty" are
/// treated the same by the accessors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default)]
    pub dietary_avoid: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub health: Vec<String>,
    #[serde(default)]
    pub audience: Vec<String>,
    #[serde(default)]
    pub household: Vec<String>,
    #[serde(default)]
    pub cooking: Vec<String>,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub regional: Vec<String>,
    #[serde(default)]
    pub occasion: Vec<String>,
    #[serde(default)]
    pub season: Vec<String>,
    #[serde(default)]
    pub lifestyle: Vec<String>,
    #[serde(default)]
    pub fitness: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub budget: Vec<String>,
    #[serde(default)]
    pub shopping: Vec<String>,
    #[serde(default)]
    pub storage: Vec<String>,
    #[serde(default)]
    pub available: Vec<String>,
    #[serde(default)]
    pub must_use: Vec<String>,
}

impl UserContext {
    pub fn is_empty(&self) -> bool {
        self.dietary_avoid.is_empty()
            && self.dietary_preferences.is_empty()
            && self.health.is_empty()
            && self.audience.is_empty()
            && self.household.is_empty()
            && self.cooking.is_empty()
            && self.cuisine.is_empty()
            && self.regional.is_empty()
            && self.occasion.is_empty()
            && self.season.is_empty()
            && self.lifestyle.is_empty()
            && self.fitness.is_empty()
            && self.constraints.is_empty()
            && self.budget.is_empty()
            && self.shopping.is_empty()
            && self.storage.is_empty()
            && self.available.is_empty()
            && self.must_use.is_empty()
    }

    /// Active dietary filters mean the fetcher over-requests candidates to
    /// offset post-filter attrition.
    pub fn has_dietary_filters(&self) -> bool {
        !self.dietary_avoid.is_empty() || !self.dietary_preferences.is_empty()
    }

    /// Lowercased tag membership check for a given field.
    pub fn has_tag(field: &[String], tag: &str) -> bool {
        field.iter().any(|t| t.to_lowercase() == tag)
    }

    /// cuisine + regional, lowercased, in declaration order.
    pub fn cuisine_tags(&self) -> Vec<String> {
        self.cuisine
            .iter()
            .chain(self.regional.iter())
            .map(|t| t.to_lowercase())
            .collect()
    }
}
