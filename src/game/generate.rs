//! Content Generators
//!
//! One query per content category: jokers, consumables, shop slots,
//! packs and their contents, standard cards, vouchers, tags and bosses.
//! Every query names its random nodes from the category, the source that
//! asked for it and the ante, so the same question always advances the
//! same channel.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::items::card::CARD_POOL;
use crate::items::pack::{WeightedPack, PACK_WEIGHTS};
use crate::items::{
    Boss, Card, Deck, Edition, Enhancement, Joker, JokerData, JokerStickers, Pack, PackKind,
    Planet, Rarity, Seal, SpecialCard, Spectral, Tag, Tarot, Voucher,
};

use super::instance::{resample_id, Instance, MAX_RESAMPLES};
use super::locks::{LockSlot, Lockable};

/// Special-card roll threshold.
const SOUL_CHANCE: f64 = 0.997;

/// Pack returned when every weighted resample hits the sentinel row.
const FALLBACK_PACK: Pack = Pack::Arcana;

// =============================================================================
// SOURCES
// =============================================================================

/// What asked for a card. Part of every node id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Shop slot
    Shop,
    /// Buffoon Pack
    Buffoon,
    /// The Soul
    Soul,
    /// Wraith
    Wraith,
    /// Rare Tag
    RareTag,
    /// Uncommon Tag
    UncommonTag,
    /// Arcana Pack tarot slot
    Arcana,
    /// Arcana Pack slot turned spectral by Omen Globe
    OmenGlobe,
    /// Celestial Pack
    Celestial,
    /// Spectral Pack
    SpectralPack,
    /// The Emperor
    Emperor,
    /// The High Priestess
    HighPriestess,
    /// Judgement
    Judgement,
    /// Riff-raff
    RiffRaff,
}

impl Source {
    /// Node id fragment.
    pub const fn key(self) -> &'static str {
        match self {
            Source::Shop => "sho",
            Source::Buffoon => "buf",
            Source::Soul => "sou",
            Source::Wraith => "wra",
            Source::RareTag => "rta",
            Source::UncommonTag => "uta",
            Source::Arcana => "ar1",
            Source::OmenGlobe => "ar2",
            Source::Celestial => "pl1",
            Source::SpectralPack => "spe",
            Source::Emperor => "emp",
            Source::HighPriestess => "pri",
            Source::Judgement => "jud",
            Source::RiffRaff => "rif",
        }
    }

    /// Rarity this source always produces, if any.
    pub const fn forced_rarity(self) -> Option<Rarity> {
        match self {
            Source::Soul => Some(Rarity::Legendary),
            Source::Wraith | Source::RareTag => Some(Rarity::Rare),
            Source::UncommonTag => Some(Rarity::Uncommon),
            _ => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// A tarot, planet or spectral card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consumable {
    /// Tarot card.
    Tarot(Tarot),
    /// Planet card.
    Planet(Planet),
    /// Spectral card.
    Spectral(Spectral),
}

impl Consumable {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Consumable::Tarot(t) => t.name(),
            Consumable::Planet(p) => p.name(),
            Consumable::Spectral(s) => s.name(),
        }
    }

    /// Special card this is, if any.
    pub fn special(self) -> Option<SpecialCard> {
        match self {
            Consumable::Tarot(t) => t.special(),
            Consumable::Planet(p) => p.special(),
            Consumable::Spectral(s) => s.special(),
        }
    }
}

impl Lockable for Consumable {
    fn lock_slot(self) -> LockSlot {
        match self {
            Consumable::Tarot(t) => t.lock_slot(),
            Consumable::Planet(p) => p.lock_slot(),
            Consumable::Spectral(s) => s.lock_slot(),
        }
    }
}

impl fmt::Display for Consumable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One shop slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "item")]
pub enum ShopItem {
    /// Joker with its rolled attributes.
    Joker(JokerData),
    /// Tarot card.
    Tarot(Tarot),
    /// Planet card.
    Planet(Planet),
    /// Playing card (Magic Trick).
    PlayingCard(Card),
    /// Spectral card (Ghost Deck).
    Spectral(Spectral),
}

impl ShopItem {
    /// Category label.
    pub fn kind(&self) -> &'static str {
        match self {
            ShopItem::Joker(_) => "Joker",
            ShopItem::Tarot(_) => "Tarot",
            ShopItem::Planet(_) => "Planet",
            ShopItem::PlayingCard(_) => "Playing Card",
            ShopItem::Spectral(_) => "Spectral",
        }
    }

    /// Item name; playing cards use their key.
    pub fn name(&self) -> String {
        match self {
            ShopItem::Joker(j) => j.joker.name().to_owned(),
            ShopItem::Tarot(t) => t.name().to_owned(),
            ShopItem::Planet(p) => p.name().to_owned(),
            ShopItem::PlayingCard(c) => c.base.key(),
            ShopItem::Spectral(s) => s.name().to_owned(),
        }
    }
}

impl fmt::Display for ShopItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.name())
    }
}

/// Shop category weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShopRates {
    /// Jokers (always 20).
    pub joker: f64,
    /// Tarots.
    pub tarot: f64,
    /// Planets.
    pub planet: f64,
    /// Playing cards.
    pub playing_card: f64,
    /// Spectrals.
    pub spectral: f64,
}

impl ShopRates {
    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.joker + self.tarot + self.planet + self.playing_card + self.spectral
    }
}

/// Cards revealed by opening a pack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "cards")]
pub enum PackContents {
    /// Tarots, or spectrals with Omen Globe.
    Arcana(Vec<Consumable>),
    /// Planets.
    Celestial(Vec<Planet>),
    /// Playing cards.
    Standard(Vec<Card>),
    /// Jokers.
    Buffoon(Vec<JokerData>),
    /// Spectrals.
    Spectral(Vec<Spectral>),
}

impl PackContents {
    /// Number of cards.
    pub fn len(&self) -> usize {
        match self {
            PackContents::Arcana(c) => c.len(),
            PackContents::Celestial(c) => c.len(),
            PackContents::Standard(c) => c.len(),
            PackContents::Buffoon(c) => c.len(),
            PackContents::Spectral(c) => c.len(),
        }
    }

    /// True for an empty pack.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a special card is among the contents.
    pub fn contains_special(&self, special: SpecialCard) -> bool {
        match self {
            PackContents::Arcana(cards) => cards.iter().any(|c| c.special() == Some(special)),
            PackContents::Celestial(cards) => cards.iter().any(|c| c.special() == Some(special)),
            PackContents::Spectral(cards) => cards.iter().any(|c| c.special() == Some(special)),
            PackContents::Standard(_) | PackContents::Buffoon(_) => false,
        }
    }
}

// =============================================================================
// GENERATORS
// =============================================================================

impl Instance {
    // -------------------------------------------------------------------------
    // Consumables
    // -------------------------------------------------------------------------

    /// Whether a special card may replace a regular draw.
    fn special_available(&self, special: SpecialCard) -> bool {
        self.params().showman || !self.is_locked(special)
    }

    /// Next tarot card; `soulable` allows The Soul.
    pub fn next_tarot(&mut self, source: Source, ante: u32, soulable: bool) -> Tarot {
        if soulable
            && self.special_available(SpecialCard::TheSoul)
            && self.random(&format!("soul_Tarot{ante}")) > SOUL_CHANCE
        {
            return Tarot::TheSoul;
        }
        self.choose(&format!("Tarot{source}{ante}"), Tarot::pool())
    }

    /// Next planet card; `soulable` allows Black Hole.
    pub fn next_planet(&mut self, source: Source, ante: u32, soulable: bool) -> Planet {
        if soulable
            && self.special_available(SpecialCard::BlackHole)
            && self.random(&format!("soul_Planet{ante}")) > SOUL_CHANCE
        {
            return Planet::BlackHole;
        }
        self.choose(&format!("Planet{source}{ante}"), Planet::pool())
    }

    /// Next spectral card; `soulable` allows The Soul and Black Hole.
    ///
    /// Both specials roll on the same node, The Soul first; a Black Hole
    /// hit wins over a Soul hit.
    pub fn next_spectral(&mut self, source: Source, ante: u32, soulable: bool) -> Spectral {
        if soulable {
            let id = format!("soul_Spectral{ante}");
            let mut forced = None;
            if self.special_available(SpecialCard::TheSoul) && self.random(&id) > SOUL_CHANCE {
                forced = Some(Spectral::TheSoul);
            }
            if self.special_available(SpecialCard::BlackHole) && self.random(&id) > SOUL_CHANCE {
                forced = Some(Spectral::BlackHole);
            }
            if let Some(card) = forced {
                return card;
            }
        }
        self.choose(&format!("Spectral{source}{ante}"), Spectral::pool())
    }

    // -------------------------------------------------------------------------
    // Jokers
    // -------------------------------------------------------------------------

    /// Edition multiplier from Hone and Glow Up.
    fn edition_rate(&self) -> f64 {
        if self.is_voucher_active(Voucher::GlowUp) {
            4.0
        } else if self.is_voucher_active(Voucher::Hone) {
            2.0
        } else {
            1.0
        }
    }

    /// Next joker with rarity, edition and (optionally) stickers.
    pub fn next_joker(&mut self, source: Source, ante: u32, has_stickers: bool) -> JokerData {
        let rarity = match source.forced_rarity() {
            Some(rarity) => rarity,
            None => {
                let poll = self.random(&format!("rarity{ante}{source}"));
                if poll > 0.95 {
                    Rarity::Rare
                } else if poll > 0.7 {
                    Rarity::Uncommon
                } else {
                    Rarity::Common
                }
            }
        };

        let rate = self.edition_rate();
        let poll = self.random(&format!("edi{source}{ante}"));
        let edition = if poll > 0.997 {
            Edition::Negative
        } else if poll > 1.0 - 0.006 * rate {
            Edition::Polychrome
        } else if poll > 1.0 - 0.02 * rate {
            Edition::Holographic
        } else if poll > 1.0 - 0.04 * rate {
            Edition::Foil
        } else {
            Edition::NoEdition
        };

        let id = if rarity == Rarity::Legendary && self.params().version > 10099 {
            "Joker4".to_owned()
        } else {
            format!("Joker{}{source}{ante}", rarity as u8)
        };
        let joker = self.choose(&id, rarity.pool());

        let stickers = if has_stickers {
            self.roll_stickers(joker, source, ante)
        } else {
            JokerStickers::default()
        };

        JokerData {
            joker,
            rarity,
            edition,
            stickers,
        }
    }

    fn roll_stickers(&mut self, joker: Joker, source: Source, ante: u32) -> JokerStickers {
        let stake = self.params().stake;
        let version = self.params().version;
        let from_pack = source == Source::Buffoon;
        let mut stickers = JokerStickers::default();

        if version > 10103 {
            // Eternal and perishable share one roll and never combine
            let node = if from_pack { "packetper" } else { "etperpoll" };
            let poll = self.random(&format!("{node}{ante}"));
            stickers.eternal = poll > 0.7 && stake.allows_eternal() && joker.can_be_eternal();
            stickers.perishable = poll > 0.4
                && poll <= 0.7
                && stake.allows_perishable()
                && joker.can_be_perishable();
            if stake.allows_rental() {
                let node = if from_pack { "packssjr" } else { "ssjr" };
                stickers.rental = self.random(&format!("{node}{ante}")) > 0.7;
            }
        } else {
            if stake.allows_eternal() && joker.can_be_eternal() {
                stickers.eternal = self.random(&format!("stake_shop_joker_eternal{ante}")) > 0.7;
            }
            if version > 10099 {
                if stake.allows_perishable() && !stickers.eternal {
                    stickers.perishable = self.random(&format!("ssjp{ante}")) > 0.49;
                }
                if stake.allows_rental() {
                    stickers.rental = self.random(&format!("ssjr{ante}")) > 0.7;
                }
            }
        }
        stickers
    }

    // -------------------------------------------------------------------------
    // Shop
    // -------------------------------------------------------------------------

    /// Current shop category weights.
    pub fn shop_rates(&self) -> ShopRates {
        let tarot = if self.is_voucher_active(Voucher::TarotTycoon) {
            32.0
        } else if self.is_voucher_active(Voucher::TarotMerchant) {
            9.6
        } else {
            4.0
        };
        let planet = if self.is_voucher_active(Voucher::PlanetTycoon) {
            32.0
        } else if self.is_voucher_active(Voucher::PlanetMerchant) {
            9.6
        } else {
            4.0
        };
        ShopRates {
            joker: 20.0,
            tarot,
            planet,
            playing_card: if self.is_voucher_active(Voucher::MagicTrick) { 4.0 } else { 0.0 },
            spectral: if self.params().deck == Deck::Ghost { 2.0 } else { 0.0 },
        }
    }

    /// Next shop slot.
    pub fn next_shop_item(&mut self, ante: u32) -> ShopItem {
        let rates = self.shop_rates();
        let mut poll = self.random(&format!("cdt{ante}")) * rates.total();

        if poll < rates.joker {
            return ShopItem::Joker(self.next_joker(Source::Shop, ante, true));
        }
        poll -= rates.joker;
        if poll < rates.tarot {
            return ShopItem::Tarot(self.next_tarot(Source::Shop, ante, false));
        }
        poll -= rates.tarot;
        if poll < rates.planet {
            return ShopItem::Planet(self.next_planet(Source::Shop, ante, false));
        }
        poll -= rates.planet;
        if poll < rates.playing_card {
            return ShopItem::PlayingCard(self.next_shop_card(ante));
        }
        ShopItem::Spectral(self.next_spectral(Source::Shop, ante, false))
    }

    /// Playing card for a shop slot; Illusion may enhance it.
    fn next_shop_card(&mut self, ante: u32) -> Card {
        let enhancement = if self.is_voucher_active(Voucher::Illusion)
            && self.random("illusion") > 0.6
        {
            self.choose(&format!("Enhancedsho{ante}"), Enhancement::pool())
        } else {
            Enhancement::NoEnhancement
        };
        let base = self.choose(&format!("frontsho{ante}"), &CARD_POOL);
        Card {
            enhancement,
            ..Card::plain(base)
        }
    }

    // -------------------------------------------------------------------------
    // Packs
    // -------------------------------------------------------------------------

    /// One weighted draw over a pack table; `None` on a sentinel row.
    fn weighted_pack(&mut self, id: &str, table: &[WeightedPack]) -> Option<Pack> {
        let poll = self.random(id) * table[0].weight;
        let mut index = 1;
        let mut weight = 0.0;
        while weight < poll && index < table.len() {
            weight += table[index].weight;
            index += 1;
        }
        table[index - 1].pack
    }

    /// Weighted draw that retries sentinel rows under resample ids and
    /// gives up with [`FALLBACK_PACK`].
    fn resolve_pack(&mut self, id: &str, table: &[WeightedPack]) -> Pack {
        if let Some(pack) = self.weighted_pack(id, table) {
            return pack;
        }
        for n in 2..=MAX_RESAMPLES {
            if let Some(pack) = self.weighted_pack(&resample_id(id, n), table) {
                return pack;
            }
        }
        debug!(seed = self.seed(), id, "Pack resamples exhausted");
        FALLBACK_PACK
    }

    /// Next shop pack.
    ///
    /// The first pack of a run in ante 1 or 2 is always a Buffoon Pack
    /// from version 1.0.1 on.
    pub fn next_pack(&mut self, ante: u32) -> Pack {
        if ante <= 2 && self.params().version > 10099 && self.take_first_pack() {
            return Pack::Buffoon;
        }
        self.resolve_pack(&format!("shop_pack{ante}"), &PACK_WEIGHTS)
    }

    /// Draw `size` cards, keeping earlier cards out of later draws.
    fn draw_batch<T: Lockable>(
        &mut self,
        size: usize,
        mut draw: impl FnMut(&mut Self) -> T,
    ) -> Vec<T> {
        let showman = self.params().showman;
        let mut cards = Vec::with_capacity(size);
        for _ in 0..size {
            let card = draw(self);
            if !showman {
                self.lock(card);
            }
            cards.push(card);
        }
        if !showman {
            for &card in &cards {
                self.unlock(card);
            }
        }
        cards
    }

    /// Contents of an Arcana Pack.
    pub fn next_arcana_pack(&mut self, size: usize, ante: u32) -> Vec<Consumable> {
        self.draw_batch(size, |inst| {
            if inst.is_voucher_active(Voucher::OmenGlobe) && inst.random("omen_globe") > 0.8 {
                Consumable::Spectral(inst.next_spectral(Source::OmenGlobe, ante, true))
            } else {
                Consumable::Tarot(inst.next_tarot(Source::Arcana, ante, true))
            }
        })
    }

    /// Contents of a Celestial Pack.
    pub fn next_celestial_pack(&mut self, size: usize, ante: u32) -> Vec<Planet> {
        self.draw_batch(size, |inst| inst.next_planet(Source::Celestial, ante, true))
    }

    /// Contents of a Spectral Pack.
    pub fn next_spectral_pack(&mut self, size: usize, ante: u32) -> Vec<Spectral> {
        self.draw_batch(size, |inst| inst.next_spectral(Source::SpectralPack, ante, true))
    }

    /// Contents of a Buffoon Pack.
    pub fn next_buffoon_pack(&mut self, size: usize, ante: u32) -> Vec<JokerData> {
        self.draw_batch(size, |inst| inst.next_joker(Source::Buffoon, ante, true))
    }

    /// Contents of a Standard Pack. Playing cards are never locked.
    pub fn next_standard_pack(&mut self, size: usize, ante: u32) -> Vec<Card> {
        (0..size).map(|_| self.next_standard_card(ante)).collect()
    }

    /// Open a pack of any kind.
    pub fn open_pack(&mut self, pack: Pack, ante: u32) -> PackContents {
        let size = pack.info().size;
        match pack.kind() {
            PackKind::Arcana => PackContents::Arcana(self.next_arcana_pack(size, ante)),
            PackKind::Celestial => PackContents::Celestial(self.next_celestial_pack(size, ante)),
            PackKind::Standard => PackContents::Standard(self.next_standard_pack(size, ante)),
            PackKind::Buffoon => PackContents::Buffoon(self.next_buffoon_pack(size, ante)),
            PackKind::Spectral => PackContents::Spectral(self.next_spectral_pack(size, ante)),
        }
    }

    // -------------------------------------------------------------------------
    // Playing cards
    // -------------------------------------------------------------------------

    /// Next Standard Pack card.
    pub fn next_standard_card(&mut self, ante: u32) -> Card {
        let enhancement = if self.random(&format!("stdset{ante}")) <= 0.6 {
            Enhancement::NoEnhancement
        } else {
            self.choose(&format!("Enhancedsta{ante}"), Enhancement::pool())
        };

        let base = self.choose(&format!("frontsta{ante}"), &CARD_POOL);

        let poll = self.random(&format!("standard_edition{ante}"));
        let edition = if poll > 0.988 {
            Edition::Polychrome
        } else if poll > 0.96 {
            Edition::Holographic
        } else if poll > 0.92 {
            Edition::Foil
        } else {
            Edition::NoEdition
        };

        let seal = if self.random(&format!("stdseal{ante}")) <= 0.8 {
            Seal::NoSeal
        } else {
            let poll = self.random(&format!("stdsealtype{ante}"));
            if poll > 0.75 {
                Seal::Red
            } else if poll > 0.5 {
                Seal::Blue
            } else if poll > 0.25 {
                Seal::Gold
            } else {
                Seal::Purple
            }
        };

        Card {
            base,
            enhancement,
            edition,
            seal,
        }
    }

    // -------------------------------------------------------------------------
    // Vouchers, tags, bosses
    // -------------------------------------------------------------------------

    /// Next voucher offered at `ante`.
    pub fn next_voucher(&mut self, ante: u32) -> Voucher {
        self.choose(&format!("Voucher{ante}"), Voucher::ALL)
    }

    /// Next skip tag at `ante`.
    pub fn next_tag(&mut self, ante: u32) -> Tag {
        self.choose(&format!("Tag{ante}"), Tag::ALL)
    }

    fn boss_pool(&self, ante: u32) -> Vec<Boss> {
        Boss::ALL
            .iter()
            .copied()
            .filter(|&boss| boss.eligible_at(ante) && !self.is_locked(boss))
            .collect()
    }

    /// Next boss blind at `ante`. The boss is locked once drawn.
    ///
    /// When every eligible boss has been used, the eligible set is
    /// freed and the draw starts over.
    pub fn next_boss(&mut self, ante: u32) -> Boss {
        let mut pool = self.boss_pool(ante);
        if pool.is_empty() {
            for &boss in Boss::ALL {
                if boss.eligible_at(ante) {
                    self.unlock(boss);
                }
            }
            pool = self.boss_pool(ante);
        }
        let boss = self.choose("boss", &pool);
        self.lock(boss);
        boss
    }
}

// =============================================================================
// TESTS
// =============================================================================
