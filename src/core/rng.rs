//! Lua PRNG
//!
//! Reproduction of the 4-word xorshift generator LuaJIT uses behind
//! `math.random`, seeded from a single double. The game reseeds it from a
//! node value for every draw, so a generator rarely lives longer than one
//! or two outputs.

use serde::{Deserialize, Serialize};

use super::hash::PI;

/// Euler's number as a double (`2.7182818284590452354`).
const E: f64 = std::f64::consts::E;

/// Four shift amounts packed one per byte (1, 6, 9, 17), one per state word.
const SEED_SHIFTS: u64 = 0x1109_0601;

/// Low 52 bits: the mantissa of a double.
const MANTISSA_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;

/// Exponent bits of `1.0`; OR-ing a mantissa in gives a value in `[1, 2)`.
const ONE_EXPONENT: u64 = 0x3FF0_0000_0000_0000;

/// Outputs discarded after seeding.
const WARMUP_ROUNDS: usize = 10;

/// LuaJIT-compatible PRNG.
///
/// # Determinism Guarantee
///
/// The same seed double produces the same sequence on every platform;
/// the state is derived from the IEEE-754 bit pattern of the seed.
///
/// # Example
///
/// ```
/// use seed_scanner::core::rng::LuaRandom;
///
/// let mut rng = LuaRandom::new(0.5);
/// assert_eq!(rng.random(), 0.09657393438653461); // Always the same!
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuaRandom {
    state: [u64; 4],
}

impl Default for LuaRandom {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl LuaRandom {
    /// Seed a generator from a double and run the warm-up rounds.
    pub fn new(seed: f64) -> Self {
        let mut d = seed;
        let mut shifts = SEED_SHIFTS;
        let mut state = [0u64; 4];

        for word in state.iter_mut() {
            let floor = 1u64 << (shifts & 255);
            shifts >>= 8;
            d = d * PI + E;
            let mut bits = d.to_bits();
            if bits < floor {
                bits += floor;
            }
            *word = bits;
        }

        let mut rng = Self { state };
        for _ in 0..WARMUP_ROUNDS {
            rng.next_u64();
        }
        rng
    }

    /// Generate the next raw 64-bit value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut r = 0u64;

        let mut z = self.state[0];
        z = (((z << 31) ^ z) >> 45) ^ ((z & (u64::MAX << 1)) << 18);
        r ^= z;
        self.state[0] = z;

        z = self.state[1];
        z = (((z << 19) ^ z) >> 30) ^ ((z & (u64::MAX << 6)) << 28);
        r ^= z;
        self.state[1] = z;

        z = self.state[2];
        z = (((z << 24) ^ z) >> 48) ^ ((z & (u64::MAX << 9)) << 7);
        r ^= z;
        self.state[2] = z;

        z = self.state[3];
        z = (((z << 21) ^ z) >> 39) ^ ((z & (u64::MAX << 17)) << 8);
        r ^= z;
        self.state[3] = z;

        r
    }

    /// Generate a double in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f64 {
        let bits = (self.next_u64() & MANTISSA_MASK) | ONE_EXPONENT;
        f64::from_bits(bits) - 1.0
    }

    /// Generate an integer in `[min, max]`.
    ///
    /// Truncates toward zero like a C cast, which for the non-negative
    /// ranges the game uses is the same as flooring.
    #[inline]
    pub fn randint(&mut self, min: i32, max: i32) -> i32 {
        (self.random() * f64::from(max - min + 1)) as i32 + min
    }

    /// Get current state (for debugging).
    pub fn state(&self) -> [u64; 4] {
        self.state
    }
}

// =============================================================================
// TESTS
// =============================================================================
