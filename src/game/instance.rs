//! Generation Instance
//!
//! One instance simulates one seed. It owns the node cache that turns
//! named random channels into deterministic sequences, the availability
//! locks, and the run parameters. The content generators in
//! [`super::generate`] are built on the primitives here.
//!
//! ## Node values
//!
//! A node starts at `pseudohash(id + seed)` and is advanced on every
//! read; the value handed out is the mean of the advanced node and the
//! hashed seed. Each read reseeds a fresh [`LuaRandom`] from it.
//!
//! Instances are cheap to build and never shared between threads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::hash::{pseudohash, round13};
use crate::core::rng::LuaRandom;
use crate::items::{Deck, Stake, Voucher};

use super::config::{EngineConfig, DEFAULT_VERSION};
use super::locks::{Drawable, LockSet, Lockable};

/// Node recurrence multiplier.
const NODE_MULTIPLIER: f64 = 1.72431234;

/// Node recurrence increment.
const NODE_INCREMENT: f64 = 2.134453429141;

/// Resample attempts before a draw is accepted unconditionally.
pub const MAX_RESAMPLES: u32 = 1000;

/// Advance a node value one step.
#[inline]
fn advance_node(value: f64) -> f64 {
    round13((value * NODE_MULTIPLIER + NODE_INCREMENT) % 1.0)
}

/// Node id for the `n`th resample of a draw.
#[inline]
pub fn resample_id(id: &str, n: u32) -> String {
    format!("{id}_resample{n}")
}

// =============================================================================
// PARAMETERS
// =============================================================================

/// Run parameters owned by one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceParams {
    /// Starting deck.
    pub deck: Deck,
    /// Stake.
    pub stake: Stake,
    /// Locked items may still be drawn.
    pub showman: bool,
    /// Oops! All 6s multiplier.
    pub sixes_factor: u32,
    /// Game version number.
    pub version: u32,
    /// Profile-level locks are in force.
    pub fresh_profile: bool,
}

impl Default for InstanceParams {
    fn default() -> Self {
        Self {
            deck: Deck::Red,
            stake: Stake::White,
            showman: false,
            sixes_factor: 1,
            version: DEFAULT_VERSION,
            fresh_profile: false,
        }
    }
}

// =============================================================================
// INSTANCE
// =============================================================================

/// Deterministic content generator for one seed.
///
/// # Example
///
/// ```
/// use seed_scanner::game::Instance;
///
/// let mut a = Instance::new("7LB2WVPK");
/// let mut b = Instance::new("7LB2WVPK");
/// assert_eq!(a.random("cdt1"), b.random("cdt1"));
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    seed: String,
    hashed_seed: f64,
    nodes: HashMap<String, f64>,
    locks: LockSet,
    params: InstanceParams,
    generated_first_pack: bool,
}

impl Instance {
    /// Blank instance: nothing locked, default parameters.
    ///
    /// Any text is accepted; the game hashes whatever seed it is given.
    pub fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_owned(),
            hashed_seed: pseudohash(seed),
            nodes: HashMap::new(),
            locks: LockSet::new(),
            params: InstanceParams::default(),
            generated_first_pack: false,
        }
    }

    /// Instance set up for the start of a run under `config`.
    ///
    /// Applies the ante 1 locks, then profile gating, then the explicit
    /// unlock lists, then the stake and the deck's starting vouchers.
    pub fn from_config(seed: &str, config: &EngineConfig) -> Self {
        let mut inst = Self::new(seed);
        let fresh_profile = config.fresh_profile && config.profile_gated();
        inst.params = InstanceParams {
            deck: Deck::Red,
            stake: Stake::White,
            showman: config.showman,
            sixes_factor: config.sixes_factor,
            version: config.version,
            fresh_profile,
        };

        inst.locks.init_locks(1, fresh_profile, config.fresh_run);
        if config.profile_gated() {
            if let Some(options) = &config.selected_options {
                inst.locks.apply_profile_options(options);
            }
        }
        for &tag in &config.unlocked_tags {
            inst.locks.unlock(tag);
        }
        for &joker in &config.unlocked_jokers {
            inst.locks.unlock(joker);
        }

        inst.set_stake(config.stake);
        inst.set_deck(config.deck);
        inst
    }

    /// Seed text.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// `pseudohash` of the seed, fixed at construction.
    pub fn hashed_seed(&self) -> f64 {
        self.hashed_seed
    }

    /// Current run parameters.
    pub fn params(&self) -> &InstanceParams {
        &self.params
    }

    /// Availability state.
    pub fn locks(&self) -> &LockSet {
        &self.locks
    }

    /// Mutable availability state.
    pub fn locks_mut(&mut self) -> &mut LockSet {
        &mut self.locks
    }

    // -------------------------------------------------------------------------
    // Random channels
    // -------------------------------------------------------------------------

    /// Read a node, advancing it.
    pub fn node(&mut self, id: &str) -> f64 {
        let value = match self.nodes.get_mut(id) {
            Some(value) => {
                *value = advance_node(*value);
                *value
            }
            None => {
                let start = pseudohash(&format!("{id}{}", self.seed));
                let value = advance_node(start);
                self.nodes.insert(id.to_owned(), value);
                value
            }
        };
        #[cfg(feature = "debug-tracing")]
        trace!(id, value, "node");
        (value + self.hashed_seed) / 2.0
    }

    /// Uniform double in `[0, 1)` from a node.
    pub fn random(&mut self, id: &str) -> f64 {
        LuaRandom::new(self.node(id)).random()
    }

    /// Uniform integer in `[min, max]` from a node.
    pub fn randint(&mut self, id: &str, min: i32, max: i32) -> i32 {
        LuaRandom::new(self.node(id)).randint(min, max)
    }

    /// Uniform pick from a non-empty list, without lock checks.
    fn draw<T: Copy>(&mut self, id: &str, items: &[T]) -> T {
        debug_assert!(!items.is_empty(), "draw from empty pool {id}");
        let index = self.randint(id, 0, items.len() as i32 - 1);
        items[index as usize]
    }

    fn is_drawn_locked<T: Drawable>(&self, item: T) -> bool {
        item.draw_slot()
            .is_some_and(|slot| self.locks.is_slot_locked(slot))
    }

    /// Uniform pick that skips locked entries and retry sentinels.
    ///
    /// Rejected draws are redrawn from `"<id>_resample<n>"` for
    /// `n = 2, 3, ...`. Only the first draw honours showman. After
    /// [`MAX_RESAMPLES`] the last draw is returned whatever it is.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty.
    pub fn choose<T: Drawable>(&mut self, id: &str, items: &[T]) -> T {
        let first = self.draw(id, items);
        let rejected = (!self.params.showman && self.is_drawn_locked(first)) || first.is_retry();
        if !rejected {
            return first;
        }

        let mut resample = 2;
        loop {
            let item = self.draw(&resample_id(id, resample), items);
            resample += 1;
            if (!item.is_retry() && !self.is_drawn_locked(item)) || resample > MAX_RESAMPLES {
                if resample > MAX_RESAMPLES {
                    trace!(id, "Resample limit reached");
                }
                return item;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Locks
    // -------------------------------------------------------------------------

    /// Exclude an entry from selection.
    pub fn lock<T: Lockable>(&mut self, item: T) {
        self.locks.lock(item);
    }

    /// Make an entry selectable again.
    pub fn unlock<T: Lockable>(&mut self, item: T) {
        self.locks.unlock(item);
    }

    /// Whether an entry is excluded.
    pub fn is_locked<T: Lockable>(&self, item: T) -> bool {
        self.locks.is_locked(item)
    }

    /// Apply the locks in force when a run starts at `ante`.
    pub fn init_locks(&mut self, ante: u32, fresh_profile: bool, fresh_run: bool) {
        self.locks.init_locks(ante, fresh_profile, fresh_run);
    }

    /// Free the ante-gated entries for `ante`.
    pub fn init_unlocks(&mut self, ante: u32, fresh_profile: bool) {
        self.locks.init_unlocks(ante, fresh_profile);
    }

    /// Whether a voucher has been redeemed.
    pub fn is_voucher_active(&self, voucher: Voucher) -> bool {
        self.locks.is_voucher_active(voucher)
    }

    /// Redeem a voucher.
    pub fn activate_voucher(&mut self, voucher: Voucher) {
        self.locks.activate_voucher(voucher);
    }

    // -------------------------------------------------------------------------
    // Run setup
    // -------------------------------------------------------------------------

    /// Select the deck and redeem its starting vouchers.
    pub fn set_deck(&mut self, deck: Deck) {
        self.params.deck = deck;
        match deck {
            Deck::Magic => self.activate_voucher(Voucher::CrystalBall),
            Deck::Nebula => self.activate_voucher(Voucher::Telescope),
            Deck::Zodiac => {
                self.activate_voucher(Voucher::TarotMerchant);
                self.activate_voucher(Voucher::PlanetMerchant);
                self.activate_voucher(Voucher::Overstock);
            }
            _ => {}
        }
    }

    /// Select the stake.
    pub fn set_stake(&mut self, stake: Stake) {
        self.params.stake = stake;
    }

    /// Toggle Showman.
    pub fn set_showman(&mut self, showman: bool) {
        self.params.showman = showman;
    }

    /// Set the game version.
    pub fn set_version(&mut self, version: u32) {
        self.params.version = version;
    }

    /// Set the Oops! All 6s multiplier.
    pub fn set_sixes_factor(&mut self, factor: u32) {
        self.params.sixes_factor = factor;
    }

    /// Consume the one-shot first pack flag.
    pub(super) fn take_first_pack(&mut self) -> bool {
        !std::mem::replace(&mut self.generated_first_pack, true)
    }

    /// Whether the guaranteed first Buffoon Pack has been handed out.
    pub fn generated_first_pack(&self) -> bool {
        self.generated_first_pack
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Boss, Joker, Spectral, Tag, Voucher};

    #[test]
    fn test_node_sequence() {
        // These values must never change!
        let mut inst = Instance::new("AAAAAAAA");
        assert_eq!(inst.node("Tag1").to_bits(), 0x3fd2_9ec2_c92c_e5b7);
        assert_eq!(inst.node("Tag1").to_bits(), 0x3fda_6222_cda7_d039);
    }

    #[test]
    fn test_nodes_are_independent() {
        let mut a = Instance::new("AAAAAAAA");
        let mut b = Instance::new("AAAAAAAA");
        a.node("boss");
        a.node("Voucher1");
        assert_eq!(a.node("Tag1"), b.node("Tag1"));
    }

    #[test]
    fn test_hashed_seed_fixed() {
        let inst = Instance::new("AAAAAAAA");
        assert_eq!(inst.hashed_seed().to_bits(), 0x3fdb_af3f_e258_9800);
        assert_eq!(inst.seed(), "AAAAAAAA");
    }

    #[test]
    fn test_same_calls_same_results() {
        let mut a = Instance::new("7LB2WVPK");
        let mut b = Instance::new("7LB2WVPK");
        for _ in 0..20 {
            assert_eq!(a.random("cdt1"), b.random("cdt1"));
            assert_eq!(a.randint("frontsta1", 0, 51), b.randint("frontsta1", 0, 51));
            assert_eq!(a.choose("Tag1", Tag::ALL), b.choose("Tag1", Tag::ALL));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Instance::new("AAAAAAAA");
        let mut b = Instance::new("AAAAAAAB");
        let xs: Vec<f64> = (0..5).map(|_| a.random("cdt1")).collect();
        let ys: Vec<f64> = (0..5).map(|_| b.random("cdt1")).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_choose_skips_locked() {
        let mut inst = Instance::new("AAAAAAAA");
        for &tag in Tag::ALL {
            if tag != Tag::Charm {
                inst.lock(tag);
            }
        }
        for ante in 1..=4 {
            assert_eq!(inst.choose(&format!("Tag{ante}"), Tag::ALL), Tag::Charm);
        }
    }

    #[test]
    fn test_choose_terminates_when_all_locked() {
        let mut inst = Instance::new("AAAAAAAA");
        for &boss in Boss::ALL {
            inst.lock(boss);
        }
        // Forced acceptance after the resample limit
        let boss = inst.choose("boss", Boss::ALL);
        assert!(inst.is_locked(boss));
    }

    #[test]
    fn test_choose_retry_sentinel_never_returned() {
        let mut inst = Instance::new("7LB2WVPK");
        for ante in 1..=30 {
            let card = inst.choose(&format!("Spectralspe{ante}"), Spectral::pool());
            assert!(!card.is_retry());
        }
    }

    #[test]
    fn test_showman_accepts_locked_first_draw() {
        let mut plain = Instance::new("AAAAAAAA");
        let first = plain.choose("Tag1", Tag::ALL);

        let mut showman = Instance::new("AAAAAAAA");
        showman.set_showman(true);
        showman.lock(first);
        assert_eq!(showman.choose("Tag1", Tag::ALL), first);

        let mut locked = Instance::new("AAAAAAAA");
        locked.lock(first);
        assert_ne!(locked.choose("Tag1", Tag::ALL), first);
    }

    #[test]
    fn test_resample_id() {
        assert_eq!(resample_id("Joker1sho1", 2), "Joker1sho1_resample2");
    }

    #[test]
    fn test_from_config_defaults() {
        let inst = Instance::from_config("AAAAAAAA", &EngineConfig::default());
        assert!(inst.is_locked(Voucher::OverstockPlus));
        assert!(inst.is_locked(Boss::TheOx));
        assert!(inst.is_locked(Tag::Negative));
        assert!(!inst.is_locked(Joker::Blueprint));
        assert_eq!(inst.params().version, 10106);
    }

    #[test]
    fn test_from_config_profile_gating() {
        let mut options = vec![true; 61];
        options[38] = false; // Blueprint
        let config = EngineConfig {
            force_all_content: false,
            selected_options: Some(options.clone()),
            ..EngineConfig::default()
        };
        let inst = Instance::from_config("AAAAAAAA", &config);
        assert!(inst.is_locked(Joker::Blueprint));

        // Forced content ignores the options
        let forced = EngineConfig {
            selected_options: Some(options),
            ..EngineConfig::default()
        };
        assert!(!Instance::from_config("AAAAAAAA", &forced).is_locked(Joker::Blueprint));
    }

    #[test]
    fn test_from_config_fresh_profile_with_unlocks() {
        let config = EngineConfig {
            force_all_content: false,
            fresh_profile: true,
            unlocked_jokers: vec![Joker::Blueprint],
            ..EngineConfig::default()
        };
        let inst = Instance::from_config("AAAAAAAA", &config);
        assert!(inst.params().fresh_profile);
        assert!(!inst.is_locked(Joker::Blueprint));
        assert!(inst.is_locked(Joker::Brainstorm));
    }

    #[test]
    fn test_zodiac_deck_vouchers() {
        let config = EngineConfig {
            deck: Deck::Zodiac,
            ..EngineConfig::default()
        };
        let inst = Instance::from_config("AAAAAAAA", &config);
        assert!(inst.is_voucher_active(Voucher::TarotMerchant));
        assert!(inst.is_voucher_active(Voucher::PlanetMerchant));
        assert!(inst.is_voucher_active(Voucher::Overstock));
        assert!(inst.is_locked(Voucher::TarotMerchant));
        assert!(!inst.is_locked(Voucher::TarotTycoon));
        assert!(!inst.is_locked(Voucher::OverstockPlus));
        assert!(inst.is_locked(Voucher::GlowUp));
    }

    #[test]
    fn test_take_first_pack_once() {
        let mut inst = Instance::new("AAAAAAAA");
        assert!(!inst.generated_first_pack());
        assert!(inst.take_first_pack());
        assert!(!inst.take_first_pack());
        assert!(inst.generated_first_pack());
    }
}
