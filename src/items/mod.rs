//! Item Catalogs
//!
//! Closed, ordered enumerations of everything the generators can produce.
//! Ordinals are significant: random selection picks by position, so the
//! variant order of every catalog must match the game's tables exactly.
//! Display names come from the same declaration.

use std::fmt;

/// Catalog lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No entry in the category carries this display name.
    #[error("unknown {category} name: {name:?}")]
    UnknownName {
        /// Catalog searched.
        category: &'static str,
        /// Name that failed to resolve.
        name: String,
    },
}

/// Declare a catalog enum with its display names.
///
/// Generates `ALL` (catalog order), `COUNT`, `name()`, `index()`,
/// `from_index()`, `from_name()`, plus `Display`, `FromStr` and serde
/// impls that use the display name.
macro_rules! catalog {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $repr:ty {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr($repr)]
        #[allow(missing_docs)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every entry in catalog order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Number of entries.
            pub const COUNT: usize = Self::ALL.len();

            /// Display name.
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Catalog ordinal.
            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Entry at a catalog ordinal.
            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }

            /// Resolve a display name.
            pub fn from_name(name: &str) -> Result<Self, $crate::items::CatalogError> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|entry| entry.name() == name)
                    .ok_or_else(|| $crate::items::CatalogError::UnknownName {
                        category: stringify!($name),
                        name: name.to_string(),
                    })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::items::CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::from_name(&text).map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub mod boss;
pub mod card;
pub mod consumable;
pub mod joker;
pub mod pack;
pub mod run;
pub mod tag;
pub mod voucher;

pub use boss::Boss;
pub use card::{Card, Edition, Enhancement, PlayingCard, Rank, Seal, Suit};
pub use consumable::{Planet, Spectral, SpecialCard, Tarot};
pub use joker::{Joker, JokerData, JokerStickers, Rarity};
pub use pack::{Pack, PackInfo, PackKind, PackSize};
pub use run::{Deck, PlayedHand, Stake};
pub use tag::Tag;
pub use voucher::Voucher;

// =============================================================================
// ITEM
// =============================================================================

/// Any lockable catalog entry.
///
/// Used where lists mix categories, such as the profile unlock table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Item {
    /// A joker.
    Joker(Joker),
    /// A tarot card.
    Tarot(Tarot),
    /// A planet card.
    Planet(Planet),
    /// A spectral card.
    Spectral(Spectral),
    /// A skip tag.
    Tag(Tag),
    /// A boss blind.
    Boss(Boss),
    /// A voucher.
    Voucher(Voucher),
    /// A poker hand that can be hidden.
    PlayedHand(PlayedHand),
}

impl Item {
    /// Display name of the wrapped entry.
    pub fn name(self) -> &'static str {
        match self {
            Item::Joker(j) => j.name(),
            Item::Tarot(t) => t.name(),
            Item::Planet(p) => p.name(),
            Item::Spectral(s) => s.name(),
            Item::Tag(t) => t.name(),
            Item::Boss(b) => b.name(),
            Item::Voucher(v) => v.name(),
            Item::PlayedHand(h) => h.name(),
        }
    }

    /// Resolve a display name across every lockable catalog.
    ///
    /// Categories are searched in declaration order, so "The Soul"
    /// resolves to the tarot entry.
    pub fn from_name(name: &str) -> Result<Self, CatalogError> {
        Joker::from_name(name)
            .map(Item::Joker)
            .or_else(|_| Tarot::from_name(name).map(Item::Tarot))
            .or_else(|_| Planet::from_name(name).map(Item::Planet))
            .or_else(|_| Spectral::from_name(name).map(Item::Spectral))
            .or_else(|_| Tag::from_name(name).map(Item::Tag))
            .or_else(|_| Boss::from_name(name).map(Item::Boss))
            .or_else(|_| Voucher::from_name(name).map(Item::Voucher))
            .or_else(|_| PlayedHand::from_name(name).map(Item::PlayedHand))
            .map_err(|_| CatalogError::UnknownName {
                category: "Item",
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// TESTS
// =============================================================================
