//! Run Setup Catalogs
//!
//! Decks, stakes and the poker hands that start hidden.

catalog! {
    /// Starting deck.
    #[derive(Default)]
    pub enum Deck: u8 {
        #[default]
        Red => "Red Deck",
        Blue => "Blue Deck",
        Yellow => "Yellow Deck",
        Green => "Green Deck",
        Black => "Black Deck",
        Magic => "Magic Deck",
        Nebula => "Nebula Deck",
        Ghost => "Ghost Deck",
        Abandoned => "Abandoned Deck",
        Checkered => "Checkered Deck",
        Zodiac => "Zodiac Deck",
        Painted => "Painted Deck",
        Anaglyph => "Anaglyph Deck",
        Plasma => "Plasma Deck",
        Erratic => "Erratic Deck",
    }
}

catalog! {
    /// Difficulty stake, lowest first.
    #[derive(Default)]
    pub enum Stake: u8 {
        #[default]
        White => "White Stake",
        Red => "Red Stake",
        Green => "Green Stake",
        Black => "Black Stake",
        Blue => "Blue Stake",
        Purple => "Purple Stake",
        Orange => "Orange Stake",
        Gold => "Gold Stake",
    }
}

catalog! {
    /// Secret poker hands, hidden until first played.
    pub enum PlayedHand: u8 {
        FiveOfAKind => "Five of a Kind",
        FlushHouse => "Flush House",
        FlushFive => "Flush Five",
    }
}

impl Stake {
    /// Shop jokers can roll eternal (Black Stake and up).
    pub fn allows_eternal(self) -> bool {
        self >= Stake::Black
    }

    /// Shop jokers can roll perishable (Orange Stake and up).
    pub fn allows_perishable(self) -> bool {
        self >= Stake::Orange
    }

    /// Shop jokers can roll rental (Gold Stake).
    pub fn allows_rental(self) -> bool {
        self == Stake::Gold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticker_stakes() {
        assert!(!Stake::Green.allows_eternal());
        assert!(Stake::Black.allows_eternal());
        assert!(Stake::Gold.allows_eternal());
        assert!(!Stake::Purple.allows_perishable());
        assert!(Stake::Orange.allows_perishable());
        assert!(!Stake::Orange.allows_rental());
        assert!(Stake::Gold.allows_rental());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Deck::default().name(), "Red Deck");
        assert_eq!(Stake::default().name(), "White Stake");
        assert_eq!(Deck::default(), Deck::Red);
        assert_eq!(Stake::default(), Stake::White);
    }
}
