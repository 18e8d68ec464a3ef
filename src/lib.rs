//! # Balatro Seed Scanner
//!
//! Bit-exact replay of Balatro's content generation, plus a parallel
//! scanner that runs seed filters across the whole seed space.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   BALATRO SEED SCANNER                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── hash.rs     - pseudohash and round13                    │
//! │  ├── rng.rs      - LuaJIT math.random (Tausworthe)           │
//! │  └── seed.rs     - 8-symbol seeds and their numbering        │
//! │                                                              │
//! │  items/          - Ordered catalogs (jokers, cards, ...)     │
//! │                                                              │
//! │  game/           - Generation engine (deterministic)         │
//! │  ├── locks.rs    - Per-category availability bitsets         │
//! │  ├── config.rs   - Run settings                              │
//! │  ├── instance.rs - Node cache and choice with resample       │
//! │  └── generate.rs - Jokers, packs, shop, tags, bosses, ...    │
//! │                                                              │
//! │  search/         - Scan engine (parallel)                    │
//! │  ├── filters.rs  - Seed filters                              │
//! │  ├── scanner.rs  - Strided workers and reporter              │
//! │  ├── stats.rs    - Atomic progress counters                  │
//! │  ├── checkpoint.rs - Crash-safe resume file                  │
//! │  └── matchlog.rs - CSV match log                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - Every draw reads a named node derived from the seed
//! - Floating-point steps are rounded exactly as the game rounds them
//! - No system time or global state
//!
//! Given the same seed and configuration, every generator returns the
//! same sequence the game would show.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod items;
pub mod search;

// Re-export commonly used types
pub use crate::core::{number_to_seed, pseudohash, round13, seed_to_number, LuaRandom, Seed, SEED_SPACE};
pub use crate::game::{EngineConfig, Instance, SharedConfig, Source};
pub use crate::search::{ScanConfig, Scanner, SeedFilter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
