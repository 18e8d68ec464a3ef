//! Availability Locks
//!
//! One bitset per catalog category records which entries are currently
//! excluded from random selection. A separate bitset tracks redeemed
//! vouchers, which is ownership rather than availability.
//!
//! All lock tables below are literal game data.

use crate::items::{
    Boss, Enhancement, Item, Joker, JokerData, Planet, PlayedHand, PlayingCard, SpecialCard,
    Spectral, Tag, Tarot, Voucher,
};

// =============================================================================
// CATEGORIES AND SLOTS
// =============================================================================

/// Catalog category with its own lock bitset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LockCategory {
    /// Jokers
    Joker = 0,
    /// Regular tarots
    Tarot = 1,
    /// Regular planets
    Planet = 2,
    /// Regular spectrals
    Spectral = 3,
    /// The Soul and Black Hole, shared by every consumable category
    Special = 4,
    /// Skip tags
    Tag = 5,
    /// Boss blinds
    Boss = 6,
    /// Vouchers
    Voucher = 7,
    /// Secret poker hands
    PlayedHand = 8,
}

const CATEGORY_COUNT: usize = 9;

/// Position of an entry in the lock arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LockSlot {
    /// Bitset to address.
    pub category: LockCategory,
    /// Catalog ordinal within the category.
    pub index: usize,
}

impl LockSlot {
    /// Slot for an ordinal in a category.
    pub const fn new(category: LockCategory, index: usize) -> Self {
        Self { category, index }
    }
}

/// Catalog entries that can be locked.
pub trait Lockable: Copy {
    /// Where this entry's lock bit lives.
    fn lock_slot(self) -> LockSlot;
}

/// Entries that can come out of a choice-with-resample draw.
///
/// Entries without a lock slot (playing cards, enhancements) are never
/// excluded. Retry entries always force a resample.
pub trait Drawable: Copy {
    /// Lock bit consulted before accepting the draw.
    fn draw_slot(self) -> Option<LockSlot>;

    /// Sentinel entry that must be redrawn.
    fn is_retry(self) -> bool {
        false
    }
}

macro_rules! plain_lockable {
    ($($ty:ident => $category:ident),+ $(,)?) => {
        $(
            impl Lockable for $ty {
                #[inline]
                fn lock_slot(self) -> LockSlot {
                    LockSlot::new(LockCategory::$category, self.index())
                }
            }

            impl Drawable for $ty {
                #[inline]
                fn draw_slot(self) -> Option<LockSlot> {
                    Some(self.lock_slot())
                }
            }
        )+
    };
}

plain_lockable! {
    Joker => Joker,
    Tag => Tag,
    Boss => Boss,
    Voucher => Voucher,
    PlayedHand => PlayedHand,
}

impl Lockable for SpecialCard {
    #[inline]
    fn lock_slot(self) -> LockSlot {
        LockSlot::new(LockCategory::Special, self as usize)
    }
}

impl Lockable for Tarot {
    #[inline]
    fn lock_slot(self) -> LockSlot {
        match self.special() {
            Some(special) => special.lock_slot(),
            None => LockSlot::new(LockCategory::Tarot, self.index()),
        }
    }
}

impl Drawable for Tarot {
    #[inline]
    fn draw_slot(self) -> Option<LockSlot> {
        Some(self.lock_slot())
    }
}

impl Lockable for Planet {
    #[inline]
    fn lock_slot(self) -> LockSlot {
        match self.special() {
            Some(special) => special.lock_slot(),
            None => LockSlot::new(LockCategory::Planet, self.index()),
        }
    }
}

impl Drawable for Planet {
    #[inline]
    fn draw_slot(self) -> Option<LockSlot> {
        Some(self.lock_slot())
    }
}

impl Lockable for Spectral {
    #[inline]
    fn lock_slot(self) -> LockSlot {
        match self.special() {
            Some(special) => special.lock_slot(),
            None => LockSlot::new(LockCategory::Spectral, self.index()),
        }
    }
}

impl Drawable for Spectral {
    #[inline]
    fn draw_slot(self) -> Option<LockSlot> {
        Some(self.lock_slot())
    }

    /// The Soul and Black Hole slots of the spectral pool are retries.
    #[inline]
    fn is_retry(self) -> bool {
        self.special().is_some()
    }
}

impl Lockable for JokerData {
    #[inline]
    fn lock_slot(self) -> LockSlot {
        self.joker.lock_slot()
    }
}

impl Drawable for PlayingCard {
    #[inline]
    fn draw_slot(self) -> Option<LockSlot> {
        None
    }
}

impl Drawable for Enhancement {
    #[inline]
    fn draw_slot(self) -> Option<LockSlot> {
        None
    }
}

impl Lockable for Item {
    fn lock_slot(self) -> LockSlot {
        match self {
            Item::Joker(j) => j.lock_slot(),
            Item::Tarot(t) => t.lock_slot(),
            Item::Planet(p) => p.lock_slot(),
            Item::Spectral(s) => s.lock_slot(),
            Item::Tag(t) => t.lock_slot(),
            Item::Boss(b) => b.lock_slot(),
            Item::Voucher(v) => v.lock_slot(),
            Item::PlayedHand(h) => h.lock_slot(),
        }
    }
}

// =============================================================================
// LOCK TABLES
// =============================================================================

/// Upgrade vouchers, locked until their base voucher is redeemed.
pub const UPGRADE_VOUCHERS: [Voucher; 16] = [
    Voucher::OverstockPlus,
    Voucher::Liquidation,
    Voucher::GlowUp,
    Voucher::RerollGlut,
    Voucher::OmenGlobe,
    Voucher::Observatory,
    Voucher::NachoTong,
    Voucher::Recyclomancy,
    Voucher::TarotTycoon,
    Voucher::PlanetTycoon,
    Voucher::MoneyTree,
    Voucher::Antimatter,
    Voucher::Illusion,
    Voucher::Petroglyph,
    Voucher::Retcon,
    Voucher::Palette,
];

/// Bosses that cannot appear before ante 2.
const ANTE_2_BOSSES: [Boss; 10] = [
    Boss::TheMouth,
    Boss::TheFish,
    Boss::TheWall,
    Boss::TheHouse,
    Boss::TheMark,
    Boss::TheWheel,
    Boss::TheArm,
    Boss::TheWater,
    Boss::TheNeedle,
    Boss::TheFlint,
];

/// Tags that cannot appear before ante 2.
const ANTE_2_TAGS: [Tag; 9] = [
    Tag::Negative,
    Tag::Standard,
    Tag::Meteor,
    Tag::Buffoon,
    Tag::Handy,
    Tag::Garbage,
    Tag::Ethereal,
    Tag::TopUp,
    Tag::Orbital,
];

/// Minimum ante for the remaining gated bosses.
const LATE_BOSS_GATES: [(u32, &[Boss]); 4] = [
    (3, &[Boss::TheTooth, Boss::TheEye]),
    (4, &[Boss::ThePlant]),
    (5, &[Boss::TheSerpent]),
    (6, &[Boss::TheOx]),
];

/// Items a new player profile has not unlocked yet, in profile-option
/// order: upgrade vouchers, then tags, then jokers.
pub const PROFILE_UNLOCKS: [Item; 61] = [
    Item::Voucher(Voucher::OverstockPlus),
    Item::Voucher(Voucher::Liquidation),
    Item::Voucher(Voucher::GlowUp),
    Item::Voucher(Voucher::RerollGlut),
    Item::Voucher(Voucher::OmenGlobe),
    Item::Voucher(Voucher::Observatory),
    Item::Voucher(Voucher::NachoTong),
    Item::Voucher(Voucher::Recyclomancy),
    Item::Voucher(Voucher::TarotTycoon),
    Item::Voucher(Voucher::PlanetTycoon),
    Item::Voucher(Voucher::MoneyTree),
    Item::Voucher(Voucher::Antimatter),
    Item::Voucher(Voucher::Illusion),
    Item::Voucher(Voucher::Petroglyph),
    Item::Voucher(Voucher::Retcon),
    Item::Voucher(Voucher::Palette),
    Item::Tag(Tag::Negative),
    Item::Tag(Tag::Foil),
    Item::Tag(Tag::Holographic),
    Item::Tag(Tag::Polychrome),
    Item::Tag(Tag::Rare),
    Item::Joker(Joker::GoldenTicket),
    Item::Joker(Joker::MrBones),
    Item::Joker(Joker::Acrobat),
    Item::Joker(Joker::SockAndBuskin),
    Item::Joker(Joker::Swashbuckler),
    Item::Joker(Joker::Troubadour),
    Item::Joker(Joker::Certificate),
    Item::Joker(Joker::SmearedJoker),
    Item::Joker(Joker::Throwback),
    Item::Joker(Joker::HangingChad),
    Item::Joker(Joker::RoughGem),
    Item::Joker(Joker::Bloodstone),
    Item::Joker(Joker::Arrowhead),
    Item::Joker(Joker::OnyxAgate),
    Item::Joker(Joker::GlassJoker),
    Item::Joker(Joker::Showman),
    Item::Joker(Joker::FlowerPot),
    Item::Joker(Joker::Blueprint),
    Item::Joker(Joker::WeeJoker),
    Item::Joker(Joker::MerryAndy),
    Item::Joker(Joker::OopsAll6s),
    Item::Joker(Joker::TheIdol),
    Item::Joker(Joker::SeeingDouble),
    Item::Joker(Joker::Matador),
    Item::Joker(Joker::HitTheRoad),
    Item::Joker(Joker::TheDuo),
    Item::Joker(Joker::TheTrio),
    Item::Joker(Joker::TheFamily),
    Item::Joker(Joker::TheOrder),
    Item::Joker(Joker::TheTribe),
    Item::Joker(Joker::Stuntman),
    Item::Joker(Joker::InvisibleJoker),
    Item::Joker(Joker::Brainstorm),
    Item::Joker(Joker::Satellite),
    Item::Joker(Joker::ShootTheMoon),
    Item::Joker(Joker::DriversLicense),
    Item::Joker(Joker::Cartomancer),
    Item::Joker(Joker::Astronomer),
    Item::Joker(Joker::BurntJoker),
    Item::Joker(Joker::Bootstraps),
];

/// Items not yet discovered at the start of a fresh run.
const FRESH_RUN_LOCKS: [Item; 12] = [
    Item::Planet(Planet::PlanetX),
    Item::Planet(Planet::Ceres),
    Item::Planet(Planet::Eris),
    Item::PlayedHand(PlayedHand::FiveOfAKind),
    Item::PlayedHand(PlayedHand::FlushHouse),
    Item::PlayedHand(PlayedHand::FlushFive),
    Item::Joker(Joker::StoneJoker),
    Item::Joker(Joker::SteelJoker),
    Item::Joker(Joker::GlassJoker),
    Item::Joker(Joker::GoldenTicket),
    Item::Joker(Joker::LuckyCat),
    Item::Joker(Joker::Cavendish),
];

// =============================================================================
// BITSETS
// =============================================================================

/// Fixed-size bitset wide enough for the largest catalog (150 jokers).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct CategoryBits([u64; 3]);

impl CategoryBits {
    #[inline]
    fn set(&mut self, index: usize) {
        self.0[index / 64] |= 1 << (index % 64);
    }

    #[inline]
    fn clear(&mut self, index: usize) {
        self.0[index / 64] &= !(1 << (index % 64));
    }

    #[inline]
    fn get(&self, index: usize) -> bool {
        self.0[index / 64] & (1 << (index % 64)) != 0
    }

    fn count(&self) -> u32 {
        self.0.iter().map(|w| w.count_ones()).sum()
    }
}

/// Per-category lock state plus redeemed vouchers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockSet {
    locked: [CategoryBits; CATEGORY_COUNT],
    active_vouchers: CategoryBits,
}

impl LockSet {
    /// Empty lock set: everything available, nothing redeemed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude an entry from selection.
    #[inline]
    pub fn lock<T: Lockable>(&mut self, item: T) {
        let slot = item.lock_slot();
        self.locked[slot.category as usize].set(slot.index);
    }

    /// Make an entry selectable again.
    #[inline]
    pub fn unlock<T: Lockable>(&mut self, item: T) {
        let slot = item.lock_slot();
        self.locked[slot.category as usize].clear(slot.index);
    }

    /// Whether an entry is excluded.
    #[inline]
    pub fn is_locked<T: Lockable>(&self, item: T) -> bool {
        self.is_slot_locked(item.lock_slot())
    }

    /// Whether a raw slot is excluded.
    #[inline]
    pub fn is_slot_locked(&self, slot: LockSlot) -> bool {
        self.locked[slot.category as usize].get(slot.index)
    }

    /// Clear every lock and every redeemed voucher.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Number of locked entries in a category.
    pub fn locked_count(&self, category: LockCategory) -> u32 {
        self.locked[category as usize].count()
    }

    /// Whether a voucher has been redeemed this run.
    #[inline]
    pub fn is_voucher_active(&self, voucher: Voucher) -> bool {
        self.active_vouchers.get(voucher.index())
    }

    /// Redeem a voucher: mark it active, lock it, and free its upgrade.
    pub fn activate_voucher(&mut self, voucher: Voucher) {
        self.active_vouchers.set(voucher.index());
        self.lock(voucher);
        if let Some(upgrade) = voucher.upgrade() {
            self.unlock(upgrade);
        }
    }

    /// Apply the locks in force when a run starts at `ante`.
    pub fn init_locks(&mut self, ante: u32, fresh_profile: bool, fresh_run: bool) {
        for voucher in UPGRADE_VOUCHERS {
            self.lock(voucher);
        }

        if ante < 2 {
            for boss in ANTE_2_BOSSES {
                self.lock(boss);
            }
            for tag in ANTE_2_TAGS {
                self.lock(tag);
            }
        }
        for (min_ante, bosses) in LATE_BOSS_GATES {
            if ante < min_ante {
                for &boss in bosses {
                    self.lock(boss);
                }
            }
        }

        if fresh_profile {
            for item in PROFILE_UNLOCKS {
                self.lock(item);
            }
        }
        if fresh_run {
            for item in FRESH_RUN_LOCKS {
                self.lock(item);
            }
        }
    }

    /// Free the ante-gated entries that become available on reaching `ante`.
    ///
    /// The Negative Tag stays locked on a fresh profile.
    pub fn init_unlocks(&mut self, ante: u32, fresh_profile: bool) {
        if ante == 2 {
            for boss in ANTE_2_BOSSES {
                self.unlock(boss);
            }
            for tag in ANTE_2_TAGS {
                if tag != Tag::Negative || !fresh_profile {
                    self.unlock(tag);
                }
            }
        }
        for (min_ante, bosses) in LATE_BOSS_GATES {
            if ante == min_ante {
                for &boss in bosses {
                    self.unlock(boss);
                }
            }
        }
    }

    /// Lock the profile unlockables whose option is `false`.
    ///
    /// Options map positionally onto [`PROFILE_UNLOCKS`]; extra entries
    /// are ignored.
    pub fn apply_profile_options(&mut self, options: &[bool]) {
        for (item, &enabled) in PROFILE_UNLOCKS.iter().zip(options) {
            if !enabled {
                self.lock(*item);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
