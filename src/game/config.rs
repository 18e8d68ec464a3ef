//! Engine Configuration
//!
//! Run settings applied to every generation instance: deck, stake,
//! game version and which optional content the player profile has
//! unlocked. Loaded once per process from a JSON file whose keys follow
//! the seed finder's environment format (`deck`, `stake`, `showman`,
//! `sixesFactor`, ...).

use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::items::{Deck, Joker, Stake, Tag};

use super::locks::PROFILE_UNLOCKS;

/// Game version 1.0.1f, the latest the generators model.
pub const DEFAULT_VERSION: u32 = 10106;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config text is not valid JSON for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Selected-options vector has the wrong length.
    #[error("selectedOptions must have {expected} entries, got {got}")]
    InvalidOptions {
        /// Required length.
        expected: usize,
        /// Length supplied.
        got: usize,
    },
}

/// Settings shared by every instance in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Starting deck.
    pub deck: Deck,
    /// Stake; gates joker stickers.
    pub stake: Stake,
    /// Showman owned: locked items may still be drawn.
    pub showman: bool,
    /// Probability multiplier from Oops! All 6s.
    pub sixes_factor: u32,
    /// Game version number (e.g. `10106` for 1.0.1f).
    pub version: u32,
    /// Ignore profile gating and treat all content as unlocked.
    pub force_all_content: bool,
    /// Profile that has unlocked nothing yet.
    pub fresh_profile: bool,
    /// Run that has discovered nothing yet.
    pub fresh_run: bool,
    /// Tags unlocked regardless of other settings.
    pub unlocked_tags: Vec<Tag>,
    /// Jokers unlocked regardless of other settings.
    pub unlocked_jokers: Vec<Joker>,
    /// One flag per profile unlockable, in profile order.
    pub selected_options: Option<Vec<bool>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            deck: Deck::Red,
            stake: Stake::White,
            showman: false,
            sixes_factor: 1,
            version: DEFAULT_VERSION,
            force_all_content: true,
            fresh_profile: false,
            fresh_run: false,
            unlocked_tags: Vec::new(),
            unlocked_jokers: Vec::new(),
            selected_options: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        debug!(path = %path.display(), deck = %config.deck, stake = %config.stake, "Loaded engine config");
        Ok(config)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.selected_options {
            Some(options) if options.len() != PROFILE_UNLOCKS.len() => {
                Err(ConfigError::InvalidOptions {
                    expected: PROFILE_UNLOCKS.len(),
                    got: options.len(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Whether profile-level locks apply.
    pub fn profile_gated(&self) -> bool {
        !self.force_all_content
    }
}

// =============================================================================
// SHARED CONFIG
// =============================================================================

/// Process-wide configuration handle.
///
/// Readers take a snapshot and work from their own copy; nothing holds
/// the lock while generating.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<EngineConfig>>,
}

impl SharedConfig {
    /// Wrap a config.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Copy of the current config.
    pub fn snapshot(&self) -> EngineConfig {
        self.inner.read().clone()
    }

    /// Replace the config for subsequent snapshots.
    pub fn replace(&self, config: EngineConfig) {
        *self.inner.write() = config;
    }
}

// =============================================================================
// TESTS
// =============================================================================
