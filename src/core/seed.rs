//! Seeds and the Seed-Number Codec
//!
//! A seed is 8 symbols over a 34-symbol alphabet (no `O`, no `0`). The
//! codec maps it to a number in `[0, 34^8)`, most significant symbol
//! first, so the scanner can walk the seed space with plain integers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed alphabet in codec order. Reordering it changes every seed number.
pub const SEED_ALPHABET: &[u8; 34] = b"ABCDEFGHIJKLMNPQRSTUVWXYZ123456789";

/// Number of symbols in a seed.
pub const SEED_LENGTH: usize = 8;

/// Alphabet size as the codec radix.
pub const SEED_RADIX: u64 = SEED_ALPHABET.len() as u64;

/// Total number of seeds (`34^8`).
pub const SEED_SPACE: u64 = SEED_RADIX.pow(SEED_LENGTH as u32);

/// Seed parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    /// Seed text is not exactly 8 symbols.
    #[error("seed must be 8 characters, got {0}")]
    InvalidLength(usize),

    /// Seed contains a symbol outside the alphabet.
    #[error("invalid seed character {0:?}")]
    InvalidCharacter(char),

    /// Seed number is past the end of the seed space.
    #[error("seed number {0} is outside the seed space")]
    OutOfRange(u64),
}

/// Position of a symbol in the alphabet.
#[inline]
fn symbol_index(byte: u8) -> Option<u64> {
    match byte {
        b'A'..=b'N' => Some(u64::from(byte - b'A')),
        b'P'..=b'Z' => Some(u64::from(byte - b'A') - 1),
        b'1'..=b'9' => Some(25 + u64::from(byte - b'1')),
        _ => None,
    }
}

/// An 8-symbol seed.
///
/// Immutable once constructed; always valid.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; SEED_LENGTH]);

impl Seed {
    /// The seed for number 0 (`AAAAAAAA`).
    pub const FIRST: Seed = Seed([b'A'; SEED_LENGTH]);

    /// Parse seed text, rejecting malformed input.
    pub fn parse(s: &str) -> Result<Self, SeedError> {
        let bytes = s.as_bytes();
        if s.chars().count() != SEED_LENGTH || bytes.len() != SEED_LENGTH {
            return Err(SeedError::InvalidLength(s.chars().count()));
        }
        let mut symbols = [0u8; SEED_LENGTH];
        for (slot, &byte) in symbols.iter_mut().zip(bytes) {
            if symbol_index(byte).is_none() {
                return Err(SeedError::InvalidCharacter(char::from(byte)));
            }
            *slot = byte;
        }
        Ok(Self(symbols))
    }

    /// Build the seed for a seed number.
    pub fn from_number(number: u64) -> Result<Self, SeedError> {
        if number >= SEED_SPACE {
            return Err(SeedError::OutOfRange(number));
        }
        let mut symbols = [b'A'; SEED_LENGTH];
        let mut n = number;
        for slot in symbols.iter_mut().rev() {
            *slot = SEED_ALPHABET[(n % SEED_RADIX) as usize];
            n /= SEED_RADIX;
        }
        Ok(Self(symbols))
    }

    /// Seed number of this seed.
    pub fn number(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, &byte| {
            // Construction guarantees every symbol is in the alphabet
            acc * SEED_RADIX + symbol_index(byte).unwrap_or(0)
        })
    }

    /// Seed text.
    pub fn as_str(&self) -> &str {
        // Alphabet is ASCII
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

/// Seed number of seed text, or 0 for malformed input.
///
/// 0 is also the number of `AAAAAAAA`; use [`Seed::parse`] to tell them apart.
pub fn seed_to_number(s: &str) -> u64 {
    Seed::parse(s).map(|seed| seed.number()).unwrap_or(0)
}

/// Seed text for a seed number, `None` past the end of the seed space.
pub fn number_to_seed(number: u64) -> Option<Seed> {
    Seed::from_number(number).ok()
}

impl FromStr for Seed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Seed {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({})", self.as_str())
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Seed::parse(&text).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seed_space() {
        assert_eq!(SEED_RADIX, 34);
        assert_eq!(SEED_SPACE, 1_785_793_904_896);
    }

    #[test]
    fn test_alphabet_indices() {
        for (i, &byte) in SEED_ALPHABET.iter().enumerate() {
            assert_eq!(symbol_index(byte), Some(i as u64));
        }
        assert_eq!(symbol_index(b'O'), None);
        assert_eq!(symbol_index(b'0'), None);
        assert_eq!(symbol_index(b'a'), None);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(Seed::from_number(0).unwrap().as_str(), "AAAAAAAA");
        assert_eq!(Seed::from_number(1).unwrap().as_str(), "AAAAAAAB");
        assert_eq!(Seed::from_number(33).unwrap().as_str(), "AAAAAAA9");
        assert_eq!(Seed::from_number(34).unwrap().as_str(), "AAAAAABA");
        assert_eq!(Seed::from_number(SEED_SPACE - 1).unwrap().as_str(), "99999999");
        assert_eq!(
            Seed::from_number(SEED_SPACE),
            Err(SeedError::OutOfRange(SEED_SPACE))
        );
    }

    #[test]
    fn test_seed_to_number() {
        assert_eq!(seed_to_number("AAAAAAAA"), 0);
        assert_eq!(seed_to_number("AAAAAAAB"), 1);
        assert_eq!(seed_to_number("99999999"), SEED_SPACE - 1);
        // "P" follows "N" directly
        assert_eq!(seed_to_number("AAAAAAAP"), 14);
    }

    #[test]
    fn test_malformed_seed_is_zero() {
        assert_eq!(seed_to_number("AAAAAAA"), 0);
        assert_eq!(seed_to_number("AAAAAAAO"), 0);
        assert_eq!(seed_to_number("AAAAAAA0"), 0);
        assert_eq!(seed_to_number("aaaaaaaa"), 0);
        assert_eq!(seed_to_number(""), 0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Seed::parse("ABC"), Err(SeedError::InvalidLength(3)));
        assert_eq!(
            Seed::parse("ABCDEFGO"),
            Err(SeedError::InvalidCharacter('O'))
        );
        assert!(Seed::parse("ABCDEFGÉ").is_err());
    }

    #[test]
    fn test_number_to_seed() {
        assert_eq!(number_to_seed(0), Some(Seed::FIRST));
        assert!(number_to_seed(SEED_SPACE).is_none());
    }

    #[test]
    fn test_serde_as_text() {
        let seed = Seed::parse("7LB2WVPK").unwrap();
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, "\"7LB2WVPK\"");
        let back: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seed);
        assert!(serde_json::from_str::<Seed>("\"OOPS\"").is_err());
    }

    proptest! {
        #[test]
        fn test_number_codec_bijective(n in 0..SEED_SPACE) {
            let seed = Seed::from_number(n).unwrap();
            prop_assert_eq!(seed.number(), n);
            prop_assert_eq!(Seed::parse(seed.as_str()).unwrap(), seed);
        }
    }
}
