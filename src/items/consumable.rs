//! Consumables
//!
//! Tarot, planet and spectral cards. Each catalog ends with the special
//! cards (The Soul, Black Hole) that can replace a regular draw; they sit
//! outside the regular tarot and planet pools and occupy the two trailing
//! "retry" slots of the spectral pool.

use serde::{Deserialize, Serialize};

catalog! {
    /// Tarot card.
    pub enum Tarot: u8 {
        TheFool => "The Fool",
        TheMagician => "The Magician",
        TheHighPriestess => "The High Priestess",
        TheEmpress => "The Empress",
        TheEmperor => "The Emperor",
        TheHierophant => "The Hierophant",
        TheLovers => "The Lovers",
        TheChariot => "The Chariot",
        Justice => "Justice",
        TheHermit => "The Hermit",
        TheWheelOfFortune => "The Wheel of Fortune",
        Strength => "Strength",
        TheHangedMan => "The Hanged Man",
        Death => "Death",
        Temperance => "Temperance",
        TheDevil => "The Devil",
        TheTower => "The Tower",
        TheStar => "The Star",
        TheMoon => "The Moon",
        TheSun => "The Sun",
        Judgement => "Judgement",
        TheWorld => "The World",
        TheSoul => "The Soul",
    }
}

catalog! {
    /// Planet card.
    pub enum Planet: u8 {
        Mercury => "Mercury",
        Venus => "Venus",
        Earth => "Earth",
        Mars => "Mars",
        Jupiter => "Jupiter",
        Saturn => "Saturn",
        Uranus => "Uranus",
        Neptune => "Neptune",
        Pluto => "Pluto",
        PlanetX => "Planet X",
        Ceres => "Ceres",
        Eris => "Eris",
        BlackHole => "Black Hole",
    }
}

catalog! {
    /// Spectral card.
    pub enum Spectral: u8 {
        Familiar => "Familiar",
        Grim => "Grim",
        Incantation => "Incantation",
        Talisman => "Talisman",
        Aura => "Aura",
        Wraith => "Wraith",
        Sigil => "Sigil",
        Ouija => "Ouija",
        Ectoplasm => "Ectoplasm",
        Immolate => "Immolate",
        Ankh => "Ankh",
        DejaVu => "Deja Vu",
        Hex => "Hex",
        Trance => "Trance",
        Medium => "Medium",
        Cryptid => "Cryptid",
        TheSoul => "The Soul",
        BlackHole => "Black Hole",
    }
}

/// Cards that can appear in more than one consumable category.
///
/// They share one availability entry regardless of which category
/// produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SpecialCard {
    /// Creates a legendary joker.
    TheSoul = 0,
    /// Levels up every poker hand.
    BlackHole = 1,
}

impl Tarot {
    /// The 22 regular tarots, in draw order.
    pub fn pool() -> &'static [Tarot] {
        &Tarot::ALL[..22]
    }

    /// Special card this entry stands for, if any.
    pub fn special(self) -> Option<SpecialCard> {
        (self == Tarot::TheSoul).then_some(SpecialCard::TheSoul)
    }
}

impl Planet {
    /// The 12 regular planets, in draw order.
    pub fn pool() -> &'static [Planet] {
        &Planet::ALL[..12]
    }

    /// Special card this entry stands for, if any.
    pub fn special(self) -> Option<SpecialCard> {
        (self == Planet::BlackHole).then_some(SpecialCard::BlackHole)
    }
}

impl Spectral {
    /// The 18-slot draw pool; the last two slots force a resample.
    pub fn pool() -> &'static [Spectral] {
        Spectral::ALL
    }

    /// Special card this entry stands for, if any.
    pub fn special(self) -> Option<SpecialCard> {
        match self {
            Spectral::TheSoul => Some(SpecialCard::TheSoul),
            Spectral::BlackHole => Some(SpecialCard::BlackHole),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
