use serde::{Deserialize, Serialize};

use crate::error::{LadleError, Result};

/// Engine tunables. Defaults match the production ranking behavior; presets
/// loosen or tighten the pipeline without recompiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Freshness decay window in days. A chunk indexed this long ago sits
    /// at the decay floor.
    pub freshness_decay_days: f64,
    /// Lower bound on the freshness multiplier.
    pub freshness_floor: f64,
    /// Per-distinct-term boost increment.
    pub boost_step: f64,
    /// Cap on cumulative boost from any single stage.
    pub boost_cap: f64,
    /// Multiplier applied to chunks conflicting with a user constraint.
    pub conflict_penalty: f64,
    /// Word-set Jaccard similarity above which two chunks are duplicates.
    pub jaccard_threshold: f64,
    /// Score discount for a non-duplicate chunk sharing a kept chunk's URL.
    pub diversity_discount: f64,
    /// Max chunks admitted per source URL by the diversity enforcer.
    pub max_per_source: usize,
    /// Max chunks admitted per category by the diversity enforcer.
    pub max_per_category: usize,
    /// Diversity never shrinks the result below min(this, available).
    pub diversity_floor: usize,
    /// Diversity enforcement is skipped at or below this count.
    pub diversity_skip_at: usize,
    /// Embedding cache TTL in seconds.
    pub cache_ttl_secs: u64,
    /// Hard cap on top_k after dietary over-fetch doubling.
    pub fetch_cap: usize,
    /// Max augmentation tokens appended to a query.
    pub max_augment_tokens: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            freshness_decay_days: 600.0,
            freshness_floor: 0.85,
            boost_step: 0.15,
            boost_cap: 0.6,
            conflict_penalty: 0.7,
            jaccard_threshold: 0.8,
            diversity_discount: 0.1,
            max_per_source: 2,
            max_per_category: 3,
            diversity_floor: 5,
            diversity_skip_at: 3,
            cache_ttl_secs: 86_400,
            fetch_cap: 50,
            max_augment_tokens: 6,
        }
    }
}

impl RetrievalConfig {
    /// Named presets in the spirit of search modes: "strict" trims harder,
    /// "broad" keeps more marginal candidates.
    pub fn from_mode(mode: &str) -> Self {
        match mode {
            "strict" => Self {
                jaccard_threshold: 0.7,
                conflict_penalty: 0.5,
                max_per_source: 1,
                max_per_category: 2,
                ..Default::default()
            },
            "broad" => Self {
                jaccard_threshold: 0.9,
                boost_cap: 0.9,
                max_per_source: 3,
                max_per_category: 5,
                diversity_floor: 8,
                ..Default::default()
            },
            _ => Self::default(),
        }
    }

    /// Load from an optional TOML file plus `LADLE_*` environment overrides
    /// (e.g. `LADLE_CONFLICT_PENALTY=0.5`).
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }
        builder = builder.add_source(config::Environment::with_prefix("LADLE").try_parsing(true));

        let settings = builder
            .build()
            .map_err(|e| LadleError::Configuration(e.to_string()))?;

        // Missing keys fall back to defaults field by field.
        let defaults = Self::default();
        let merged = settings
            .try_deserialize::<serde_json::Value>()
            .map_err(|e| LadleError::Configuration(e.to_string()))?;
        let mut base = serde_json::to_value(&defaults)?;
        if let (Some(base_map), Some(over_map)) = (base.as_object_mut(), merged.as_object()) {
            for (k, v) in over_map {
                base_map.insert(k.clone(), v.clone());
            }
        }
        Ok(serde_json::from_value(base)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let cfg = RetrievalConfig::default();
        assert_eq!(cfg.freshness_decay_days, 600.0);
        assert_eq!(cfg.freshness_floor, 0.85);
        assert_eq!(cfg.conflict_penalty, 0.7);
        assert_eq!(cfg.cache_ttl_secs, 86_400);
    }

    #[test]
    fn test_from_mode_unknown_is_default() {
        let cfg = RetrievalConfig::from_mode("nope");
        assert_eq!(cfg.jaccard_threshold, RetrievalConfig::default().jaccard_threshold);
    }

    #[test]
    fn test_env_override_applies() {
        // SAFETY: test-local variable, no other test reads it.
        unsafe { std::env::set_var("LADLE_CONFLICT_PENALTY", "0.5") };
        let cfg = RetrievalConfig::load(None).unwrap();
        unsafe { std::env::remove_var("LADLE_CONFLICT_PENALTY") };

        assert_eq!(cfg.conflict_penalty, 0.5);
        // Untouched fields keep their defaults.
        assert_eq!(cfg.freshness_floor, RetrievalConfig::default().freshness_floor);
    }

    #[test]
    fn test_strict_mode_tightens() {
        let cfg = RetrievalConfig::from_mode("strict");
        assert!(cfg.jaccard_threshold < RetrievalConfig::default().jaccard_threshold);
        assert_eq!(cfg.max_per_source, 1);
    }
}
