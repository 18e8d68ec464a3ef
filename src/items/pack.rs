//! Booster Packs
//!
//! Fifteen pack tiers (five kinds in three sizes) and the weight table the
//! shop draws them from.

use serde::{Deserialize, Serialize};

catalog! {
    /// Booster pack, kind-major then size.
    pub enum Pack: u8 {
        Arcana => "Arcana Pack",
        JumboArcana => "Jumbo Arcana Pack",
        MegaArcana => "Mega Arcana Pack",
        Celestial => "Celestial Pack",
        JumboCelestial => "Jumbo Celestial Pack",
        MegaCelestial => "Mega Celestial Pack",
        Standard => "Standard Pack",
        JumboStandard => "Jumbo Standard Pack",
        MegaStandard => "Mega Standard Pack",
        Buffoon => "Buffoon Pack",
        JumboBuffoon => "Jumbo Buffoon Pack",
        MegaBuffoon => "Mega Buffoon Pack",
        Spectral => "Spectral Pack",
        JumboSpectral => "Jumbo Spectral Pack",
        MegaSpectral => "Mega Spectral Pack",
    }
}

/// What a pack contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackKind {
    /// Tarot cards (spectral with Omen Globe).
    Arcana,
    /// Planet cards.
    Celestial,
    /// Playing cards.
    Standard,
    /// Jokers.
    Buffoon,
    /// Spectral cards.
    Spectral,
}

/// Pack size tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackSize {
    /// Base pack.
    Normal,
    /// Jumbo pack.
    Jumbo,
    /// Mega pack.
    Mega,
}

/// Card count and picks for a pack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackInfo {
    /// Contents.
    pub kind: PackKind,
    /// Size tier.
    pub size_tier: PackSize,
    /// Cards shown when opened.
    pub size: usize,
    /// Cards the player may take.
    pub choices: usize,
}

/// One row of the shop's pack weight table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedPack {
    /// Pack, or `None` for the sentinel row.
    pub pack: Option<Pack>,
    /// Row weight; the sentinel row carries the table total.
    pub weight: f64,
}

/// Sum of every pack weight.
pub const PACK_WEIGHT_TOTAL: f64 = 22.42;

const fn row(pack: Pack, weight: f64) -> WeightedPack {
    WeightedPack {
        pack: Some(pack),
        weight,
    }
}

/// Shop pack weights. Row 0 is the sentinel holding the total.
pub const PACK_WEIGHTS: [WeightedPack; 16] = [
    WeightedPack {
        pack: None,
        weight: PACK_WEIGHT_TOTAL,
    },
    row(Pack::Arcana, 4.0),
    row(Pack::JumboArcana, 2.0),
    row(Pack::MegaArcana, 0.5),
    row(Pack::Celestial, 4.0),
    row(Pack::JumboCelestial, 2.0),
    row(Pack::MegaCelestial, 0.5),
    row(Pack::Standard, 4.0),
    row(Pack::JumboStandard, 2.0),
    row(Pack::MegaStandard, 0.5),
    row(Pack::Buffoon, 1.2),
    row(Pack::JumboBuffoon, 0.6),
    row(Pack::MegaBuffoon, 0.15),
    row(Pack::Spectral, 0.6),
    row(Pack::JumboSpectral, 0.3),
    row(Pack::MegaSpectral, 0.07),
];

impl Pack {
    /// Contents of this pack.
    pub fn kind(self) -> PackKind {
        match self.index() / 3 {
            0 => PackKind::Arcana,
            1 => PackKind::Celestial,
            2 => PackKind::Standard,
            3 => PackKind::Buffoon,
            _ => PackKind::Spectral,
        }
    }

    /// Size tier of this pack.
    pub fn size_tier(self) -> PackSize {
        match self.index() % 3 {
            0 => PackSize::Normal,
            1 => PackSize::Jumbo,
            _ => PackSize::Mega,
        }
    }

    /// Card count and picks.
    pub fn info(self) -> PackInfo {
        let kind = self.kind();
        let size_tier = self.size_tier();
        let small = matches!(kind, PackKind::Buffoon | PackKind::Spectral);
        let size = match (size_tier, small) {
            (PackSize::Normal, true) => 2,
            (PackSize::Normal, false) => 3,
            (_, true) => 4,
            (_, false) => 5,
        };
        let choices = if size_tier == PackSize::Mega { 2 } else { 1 };
        PackInfo {
            kind,
            size_tier,
            size,
            choices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_info() {
        let arcana = Pack::Arcana.info();
        assert_eq!((arcana.size, arcana.choices), (3, 1));
        let mega_arcana = Pack::MegaArcana.info();
        assert_eq!((mega_arcana.size, mega_arcana.choices), (5, 2));
        let buffoon = Pack::Buffoon.info();
        assert_eq!((buffoon.size, buffoon.choices), (2, 1));
        let jumbo_spectral = Pack::JumboSpectral.info();
        assert_eq!(jumbo_spectral.kind, PackKind::Spectral);
        assert_eq!((jumbo_spectral.size, jumbo_spectral.choices), (4, 1));
        assert_eq!(Pack::MegaStandard.info().size, 5);
    }

    #[test]
    fn test_weight_table() {
        let sum: f64 = PACK_WEIGHTS[1..].iter().map(|r| r.weight).sum();
        assert!((sum - PACK_WEIGHT_TOTAL).abs() < 1e-9);
        for (row, pack) in PACK_WEIGHTS[1..].iter().zip(Pack::ALL) {
            assert_eq!(row.pack, Some(*pack));
        }
    }
}
