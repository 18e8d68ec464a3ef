//! Seed Filters
//!
//! A filter maps a seed to a match tier: 0 for no match, `1..=n` for
//! increasingly good matches. Filters are stateless; every call builds
//! its own [`Instance`](crate::game::Instance) from the config it is
//! handed, so one filter value can be shared by all workers.

use serde_json::Value;

use crate::game::EngineConfig;

/// Seed predicate with display metadata.
pub trait SeedFilter: Send + Sync {
    /// Display name; also names the checkpoint file.
    fn name(&self) -> &str;

    /// Names of tiers `1..=n`, in order.
    fn tier_names(&self) -> &[String];

    /// Match tier of a seed; 0 for no match.
    fn apply(&self, seed: &str, config: &EngineConfig) -> u32;

    /// Structured breakdown of what the filter saw for a seed.
    fn describe(&self, _seed: &str, _config: &EngineConfig) -> Option<Value> {
        None
    }

    /// Highest tier this filter can return.
    fn max_tier(&self) -> u32 {
        self.tier_names().len() as u32
    }

    /// Name of a tier; `None` for 0 or out-of-range tiers.
    fn tier_name(&self, tier: u32) -> Option<&str> {
        let index = (tier as usize).checked_sub(1)?;
        self.tier_names().get(index).map(String::as_str)
    }
}

/// Plain predicate function.
pub type FilterFn = fn(&str, &EngineConfig) -> u32;

/// Plain describe function.
pub type DescribeFn = fn(&str, &EngineConfig) -> Value;

/// Filter built from functions plus metadata.
#[derive(Debug, Clone)]
pub struct FnFilter {
    name: String,
    tier_names: Vec<String>,
    apply: FilterFn,
    describe: Option<DescribeFn>,
}

impl FnFilter {
    /// Wrap a predicate.
    pub fn new(name: impl Into<String>, tier_names: &[&str], apply: FilterFn) -> Self {
        Self {
            name: name.into(),
            tier_names: tier_names.iter().map(|s| s.to_string()).collect(),
            apply,
            describe: None,
        }
    }

    /// Attach a describe function.
    pub fn with_describe(mut self, describe: DescribeFn) -> Self {
        self.describe = Some(describe);
        self
    }
}

impl SeedFilter for FnFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn tier_names(&self) -> &[String] {
        &self.tier_names
    }

    fn apply(&self, seed: &str, config: &EngineConfig) -> u32 {
        (self.apply)(seed, config)
    }

    fn describe(&self, seed: &str, config: &EngineConfig) -> Option<Value> {
        self.describe.map(|describe| describe(seed, config))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn last_symbol_is_b(seed: &str, _config: &EngineConfig) -> u32 {
        u32::from(seed.ends_with('B'))
    }

    #[test]
    fn test_fn_filter() {
        let filter = FnFilter::new("Ends With B", &["B"], last_symbol_is_b);
        let config = EngineConfig::default();
        assert_eq!(filter.name(), "Ends With B");
        assert_eq!(filter.apply("AAAAAAAB", &config), 1);
        assert_eq!(filter.apply("AAAAAAAA", &config), 0);
        assert!(filter.describe("AAAAAAAB", &config).is_none());
    }

    #[test]
    fn test_tier_names() {
        let filter = FnFilter::new("Tiers", &["One", "Two"], last_symbol_is_b);
        assert_eq!(filter.max_tier(), 2);
        assert_eq!(filter.tier_name(0), None);
        assert_eq!(filter.tier_name(1), Some("One"));
        assert_eq!(filter.tier_name(2), Some("Two"));
        assert_eq!(filter.tier_name(3), None);
    }

    #[test]
    fn test_describe_attached() {
        let filter = FnFilter::new("Described", &["B"], last_symbol_is_b)
            .with_describe(|seed, _| serde_json::json!({ "seed": seed }));
        let value = filter.describe("AAAAAAAB", &EngineConfig::default()).unwrap();
        assert_eq!(value["seed"], "AAAAAAAB");
    }
}
