//! Core deterministic primitives.
//!
//! All functions in this module are bit-exact reproductions of the
//! game's arithmetic. They form the foundation every generator builds on.

pub mod hash;
pub mod rng;
pub mod seed;

// Re-export core types
pub use hash::{pseudohash, round13};
pub use rng::LuaRandom;
pub use seed::{number_to_seed, seed_to_number, Seed, SeedError, SEED_ALPHABET, SEED_SPACE};
