//! Built-in Filters
//!
//! Each filter rebuilds its instance from the config on every call.
//! The legendary filters share one step: skip to the first tag of an
//! ante, and if it is a Charm Tag open the Mega Arcana Pack it grants;
//! if The Soul is in the pack, draw the legendary it creates.

use serde::Serialize;
use serde_json::{json, Value};

use crate::game::{Consumable, EngineConfig, Instance, Source};
use crate::items::{Joker, SpecialCard, Tag};

use super::filter::FnFilter;

/// Cards in the Mega Arcana Pack granted by a Charm Tag.
const CHARM_PACK_SIZE: usize = 5;

/// Legendary sequence the Perkeo filter walks, one entry per tier.
const PERKEO_PLAN: [(u32, Joker); 3] = [
    (1, Joker::Perkeo),
    (1, Joker::Triboulet),
    (2, Joker::Yorick),
];

/// Registry keys accepted by [`builtin`].
pub const BUILTIN_FILTERS: [&str; 3] = ["perkeo", "any-legendary", "charm-tag"];

// =============================================================================
// SOUL STEP
// =============================================================================

/// What one tag → pack → soul step produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoulStep {
    /// Ante the step ran at.
    pub ante: u32,
    /// Tag drawn.
    pub tag: Tag,
    /// Pack contents, when the tag was a Charm Tag.
    pub pack: Option<Vec<Consumable>>,
    /// Legendary created by The Soul, when the pack held one.
    pub legendary: Option<Joker>,
}

/// Run one soul step. Stops drawing as soon as a link is missing.
pub fn soul_step(inst: &mut Instance, ante: u32) -> SoulStep {
    let tag = inst.next_tag(ante);
    let mut step = SoulStep {
        ante,
        tag,
        pack: None,
        legendary: None,
    };
    if tag != Tag::Charm {
        return step;
    }

    let cards = inst.next_arcana_pack(CHARM_PACK_SIZE, ante);
    let has_soul = cards
        .iter()
        .any(|card| card.special() == Some(SpecialCard::TheSoul));
    step.pack = Some(cards);
    if has_soul {
        step.legendary = Some(inst.next_joker(Source::Soul, ante, false).joker);
    }
    step
}

// =============================================================================
// FILTERS
// =============================================================================

fn perkeo_steps(seed: &str, config: &EngineConfig) -> Vec<SoulStep> {
    let mut inst = Instance::from_config(seed, config);
    let mut steps = Vec::with_capacity(PERKEO_PLAN.len());
    for (ante, wanted) in PERKEO_PLAN {
        let step = soul_step(&mut inst, ante);
        let hit = step.legendary == Some(wanted);
        steps.push(step);
        if !hit {
            break;
        }
    }
    steps
}

fn perkeo_tier(seed: &str, config: &EngineConfig) -> u32 {
    let steps = perkeo_steps(seed, config);
    steps
        .iter()
        .zip(PERKEO_PLAN)
        .take_while(|(step, (_, wanted))| step.legendary == Some(*wanted))
        .count() as u32
}

fn perkeo_describe(seed: &str, config: &EngineConfig) -> Value {
    let steps = perkeo_steps(seed, config);
    json!({
        "seed": seed,
        "tier": perkeo_tier(seed, config),
        "steps": steps,
    })
}

fn legendary_tier(legendary: Option<Joker>) -> u32 {
    match legendary {
        Some(Joker::Perkeo) => 1,
        Some(Joker::Triboulet) => 2,
        Some(Joker::Yorick) => 3,
        _ => 0,
    }
}

fn any_legendary_tier(seed: &str, config: &EngineConfig) -> u32 {
    let mut inst = Instance::from_config(seed, config);
    legendary_tier(soul_step(&mut inst, 1).legendary)
}

fn any_legendary_describe(seed: &str, config: &EngineConfig) -> Value {
    let mut inst = Instance::from_config(seed, config);
    let step = soul_step(&mut inst, 1);
    json!({
        "seed": seed,
        "tier": legendary_tier(step.legendary),
        "step": step,
    })
}

fn charm_tag_tier(seed: &str, config: &EngineConfig) -> u32 {
    let mut inst = Instance::from_config(seed, config);
    u32::from(inst.next_tag(1) == Tag::Charm)
}

fn charm_tag_describe(seed: &str, config: &EngineConfig) -> Value {
    let mut inst = Instance::from_config(seed, config);
    let tag = inst.next_tag(1);
    json!({
        "seed": seed,
        "tier": u32::from(tag == Tag::Charm),
        "tag": tag,
    })
}

/// Perkeo, then Triboulet, then Yorick from consecutive Charm Tags.
pub fn perkeo_filter() -> FnFilter {
    FnFilter::new(
        "Perkeo Filter",
        &["Perkeo", "Perkeo + Triboulet", "Perkeo + Triboulet + Yorick"],
        perkeo_tier,
    )
    .with_describe(perkeo_describe)
}

/// Which legendary the first Charm Tag's Soul creates.
pub fn any_legendary_filter() -> FnFilter {
    FnFilter::new(
        "Any Legendary Filter",
        &["Perkeo", "Triboulet", "Yorick"],
        any_legendary_tier,
    )
    .with_describe(any_legendary_describe)
}

/// First ante-1 tag is a Charm Tag.
pub fn charm_tag_filter() -> FnFilter {
    FnFilter::new("Charm Tag Filter", &["Charm Tag Found"], charm_tag_tier)
        .with_describe(charm_tag_describe)
}

/// Look up a built-in filter by registry key.
pub fn builtin(key: &str) -> Option<FnFilter> {
    match key {
        "perkeo" => Some(perkeo_filter()),
        "any-legendary" => Some(any_legendary_filter()),
        "charm-tag" => Some(charm_tag_filter()),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::filter::SeedFilter;

    fn score(filter: &FnFilter, seed: &str) -> u32 {
        filter.apply(seed, &EngineConfig::default())
    }

    #[test]
    fn test_charm_tag_seeds() {
        // These values must never change!
        let filter = charm_tag_filter();
        assert_eq!(score(&filter, "AAAAAAAD"), 1);
        assert_eq!(score(&filter, "AAAAAAAU"), 1);
        assert_eq!(score(&filter, "AAAAAAA8"), 1);
        assert_eq!(score(&filter, "AAAAAAAA"), 0);
        assert_eq!(score(&filter, "7LB2WVPK"), 0);
    }

    #[test]
    fn test_any_legendary_tiers() {
        // These values must never change!
        let filter = any_legendary_filter();
        assert_eq!(score(&filter, "AAAAAIGP"), 1);
        assert_eq!(score(&filter, "AAAAAL3S"), 1);
        assert_eq!(score(&filter, "AAAAAGXI"), 2);
        assert_eq!(score(&filter, "AAAAAPAL"), 2);
        assert_eq!(score(&filter, "AAAAAC5M"), 3);
        assert_eq!(score(&filter, "AAAAAM63"), 3);
        assert_eq!(score(&filter, "AAAAAAAD"), 0);
    }

    #[test]
    fn test_perkeo_tiers() {
        // These values must never change!
        let filter = perkeo_filter();
        assert_eq!(score(&filter, "AAAAAIGP"), 1);
        assert_eq!(score(&filter, "AAAAAL3S"), 1);
        assert_eq!(score(&filter, "AAAAAT9A"), 1);
        assert_eq!(score(&filter, "AAAAAGXI"), 0);
        assert_eq!(score(&filter, "AAAAAAAA"), 0);
    }

    #[test]
    fn test_soul_step_stops_early() {
        let mut inst = Instance::from_config("AAAAAAAA", &EngineConfig::default());
        let step = soul_step(&mut inst, 1);
        assert_eq!(step.tag, Tag::Speed);
        assert!(step.pack.is_none());
        assert!(step.legendary.is_none());
    }

    #[test]
    fn test_soul_step_opens_pack() {
        let mut inst = Instance::from_config("AAAAAC5M", &EngineConfig::default());
        let step = soul_step(&mut inst, 1);
        assert_eq!(step.tag, Tag::Charm);
        let pack = step.pack.unwrap();
        assert_eq!(pack.len(), CHARM_PACK_SIZE);
        assert!(pack.iter().any(|c| c.special() == Some(SpecialCard::TheSoul)));
        assert_eq!(step.legendary, Some(Joker::Yorick));
    }

    #[test]
    fn test_perkeo_describe() {
        let filter = perkeo_filter();
        let value = filter
            .describe("AAAAAIGP", &EngineConfig::default())
            .unwrap();
        assert_eq!(value["tier"], 1);
        assert_eq!(value["steps"][0]["legendary"], "Perkeo");
        assert_eq!(value["steps"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_describe_matches_tier() {
        let config = EngineConfig::default();
        for key in BUILTIN_FILTERS {
            let filter = builtin(key).unwrap();
            for seed in ["AAAAAAAD", "AAAAAC5M", "AAAAAIGP", "AAAAAAAA"] {
                let value = filter.describe(seed, &config).unwrap();
                assert_eq!(value["tier"], filter.apply(seed, &config), "{key} {seed}");
            }
        }
    }

    #[test]
    fn test_registry() {
        assert_eq!(builtin("perkeo").unwrap().name(), "Perkeo Filter");
        assert_eq!(builtin("any-legendary").unwrap().max_tier(), 3);
        assert_eq!(
            builtin("charm-tag").unwrap().tier_name(1),
            Some("Charm Tag Found")
        );
        assert!(builtin("nope").is_none());
    }
}
