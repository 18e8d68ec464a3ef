//! Seed Hashing and Rounding
//!
//! The two floating-point transforms every random node is built from.
//! Both are bit-exact reproductions of the game's Lua arithmetic: the
//! accumulated rounding error is part of the contract, so the operation
//! order here must not be "simplified".

/// Multiplier applied to the running accumulator in [`pseudohash`].
pub const PSEUDOHASH_K1: f64 = 1.1239285023;

/// π as a double (`3.141592653589793116`).
pub const PI: f64 = std::f64::consts::PI;

/// 10^13: decimal precision kept by [`round13`].
const INV_PREC: f64 = 10_000_000_000_000.0;

/// 2^13 and 5^13; together they split 10^13 for the tie-break.
const TWO_INV_PREC: f64 = 8192.0;
const FIVE_INV_PREC: f64 = 1_220_703_125.0;

/// Hash a string into a double in `[0, 1)`.
///
/// Bytes are consumed from last to first and treated as signed 8-bit
/// values. The empty string hashes to `1.0`. A NaN accumulator is
/// returned as NaN rather than clamped so callers can detect it.
///
/// # Example
///
/// ```
/// use seed_scanner::core::hash::pseudohash;
///
/// let h = pseudohash("AAAAAAAA");
/// assert_eq!(h.to_bits(), 0x3fdb_af3f_e258_9800); // Always the same!
/// ```
#[inline]
pub fn pseudohash(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut num = 1.0f64;

    for i in 0..len {
        let byte = f64::from(bytes[len - 1 - i] as i8);
        let temp = PSEUDOHASH_K1 / num * byte * PI + PI * (len - i) as f64;
        num = temp - temp.floor();
    }

    if num.is_nan() {
        f64::NAN
    } else {
        num
    }
}

/// Round to 13 decimal places the way the game does.
///
/// Rounds down by default and only rounds up when the remainder past the
/// 13th digit, reconstructed through the 2^13 · 5^13 split, is at least
/// one half. Values that are already representable (or one ulp below
/// `x` toward 1) are kept as the truncated candidate.
#[inline]
pub fn round13(x: f64) -> f64 {
    let tentative = (x * INV_PREC).floor() / INV_PREC;
    let scaled = x * TWO_INV_PREC;
    let truncated = (scaled - scaled.floor()) * FIVE_INV_PREC;

    if tentative != x
        && tentative != next_toward_one(x)
        && (truncated - truncated.floor()) >= 0.5
    {
        return ((x * INV_PREC).floor() + 1.0) / INV_PREC;
    }
    tentative
}

/// The next representable double after `x` in the direction of `1.0`
/// (C's `nextafter(x, 1.0)`).
#[inline]
pub fn next_toward_one(x: f64) -> f64 {
    if x.is_nan() || x == 1.0 {
        return x;
    }
    if x == 0.0 {
        // Smallest positive subnormal, whatever the sign of zero.
        return f64::from_bits(1);
    }

    let bits = x.to_bits();
    let moving_away_from_zero = (x < 1.0) == (x > 0.0);
    if moving_away_from_zero {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

// =============================================================================
// TESTS
// =============================================================================
