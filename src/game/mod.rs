//! Generation Engine
//!
//! Everything needed to replay a seed's content. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `locks`: Per-category availability bitsets and their init tables
//! - `config`: Run settings shared by every instance
//! - `instance`: Node cache, random draws, choice with resample
//! - `generate`: One query per content category

pub mod config;
pub mod generate;
pub mod instance;
pub mod locks;

// Re-export key types
pub use config::{ConfigError, EngineConfig, SharedConfig, DEFAULT_VERSION};
pub use generate::{Consumable, PackContents, ShopItem, ShopRates, Source};
pub use instance::{Instance, InstanceParams, MAX_RESAMPLES};
pub use locks::{Drawable, LockCategory, LockSet, LockSlot, Lockable, PROFILE_UNLOCKS};
