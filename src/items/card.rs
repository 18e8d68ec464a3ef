//! Playing Cards and Card Modifiers
//!
//! Playing cards are drawn from a 52-entry pool whose order follows the
//! game's sorted card keys (`C_2` … `S_T`), so ranks within a suit run
//! 2-9, A, J, K, Q, T rather than in play order.

use std::fmt;

use serde::{Deserialize, Serialize};

catalog! {
    /// Card enhancement; `NoEnhancement` is not part of the draw pool.
    pub enum Enhancement: u8 {
        NoEnhancement => "No Enhancement",
        Bonus => "Bonus",
        Mult => "Mult",
        Wild => "Wild",
        Glass => "Glass",
        Steel => "Steel",
        Stone => "Stone",
        Gold => "Gold",
        Lucky => "Lucky",
    }
}

catalog! {
    /// Card or joker edition.
    #[derive(Default)]
    pub enum Edition: u8 {
        #[default]
        NoEdition => "No Edition",
        Foil => "Foil",
        Holographic => "Holographic",
        Polychrome => "Polychrome",
        Negative => "Negative",
    }
}

catalog! {
    /// Playing card seal.
    pub enum Seal: u8 {
        NoSeal => "No Seal",
        Red => "Red Seal",
        Blue => "Blue Seal",
        Gold => "Gold Seal",
        Purple => "Purple Seal",
    }
}

impl Enhancement {
    /// The 8 real enhancements, in draw order.
    pub fn pool() -> &'static [Enhancement] {
        &Enhancement::ALL[1..]
    }
}

// =============================================================================
// PLAYING CARD
// =============================================================================

/// Card suit, in pool order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    /// ♣
    Clubs = 0,
    /// ♦
    Diamonds = 1,
    /// ♥
    Hearts = 2,
    /// ♠
    Spades = 3,
}

impl Suit {
    /// All suits in pool order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// One-letter key prefix.
    pub const fn key(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

/// Card rank, in play order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

/// Ranks in the order they appear within a suit of the draw pool.
pub const RANK_POOL_ORDER: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ace,
    Rank::Jack,
    Rank::King,
    Rank::Queen,
    Rank::Ten,
];

impl Rank {
    /// One-character key suffix.
    pub const fn key(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

/// A suit and rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayingCard {
    /// Suit.
    pub suit: Suit,
    /// Rank.
    pub rank: Rank,
}

/// All 52 cards in draw order.
pub const CARD_POOL: [PlayingCard; 52] = build_card_pool();

const fn build_card_pool() -> [PlayingCard; 52] {
    let mut pool = [PlayingCard { suit: Suit::Clubs, rank: Rank::Two }; 52];
    let mut s = 0;
    while s < 4 {
        let mut r = 0;
        while r < 13 {
            pool[s * 13 + r] = PlayingCard {
                suit: Suit::ALL[s],
                rank: RANK_POOL_ORDER[r],
            };
            r += 1;
        }
        s += 1;
    }
    pool
}

impl PlayingCard {
    /// Game key, e.g. `H_T` for the ten of hearts.
    pub fn key(self) -> String {
        format!("{}_{}", self.suit.key(), self.rank.key())
    }
}

impl fmt::Display for PlayingCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.suit.key(), self.rank.key())
    }
}

// =============================================================================
// GENERATED CARD
// =============================================================================

/// A playing card with its rolled modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Suit and rank.
    pub base: PlayingCard,
    /// Enhancement, or `NoEnhancement`.
    pub enhancement: Enhancement,
    /// Edition, or `NoEdition`.
    pub edition: Edition,
    /// Seal, or `NoSeal`.
    pub seal: Seal,
}

impl Card {
    /// An unmodified card.
    pub fn plain(base: PlayingCard) -> Self {
        Self {
            base,
            enhancement: Enhancement::NoEnhancement,
            edition: Edition::NoEdition,
            seal: Seal::NoSeal,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_pool_order() {
        assert_eq!(CARD_POOL[0].key(), "C_2");
        assert_eq!(CARD_POOL[8].key(), "C_A");
        assert_eq!(CARD_POOL[12].key(), "C_T");
        assert_eq!(CARD_POOL[13].key(), "D_2");
        assert_eq!(CARD_POOL[51].key(), "S_T");
    }

    #[test]
    fn test_card_pool_sorted_by_key() {
        // The pool is the game's card table sorted by key
        let keys: Vec<String> = CARD_POOL.iter().map(|c| c.key()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_enhancement_pool() {
        assert_eq!(Enhancement::pool().len(), 8);
        assert_eq!(Enhancement::pool()[0], Enhancement::Bonus);
        assert!(!Enhancement::pool().contains(&Enhancement::NoEnhancement));
    }

    #[test]
    fn test_plain_card() {
        let card = Card::plain(CARD_POOL[0]);
        assert_eq!(card.seal, Seal::NoSeal);
        assert_eq!(card.base.to_string(), "C_2");
        assert_eq!(card.edition, Edition::default());
    }

    #[test]
    fn test_edition_default() {
        assert_eq!(Edition::default(), Edition::NoEdition);
        assert_eq!(Edition::default().name(), "No Edition");
    }
}
