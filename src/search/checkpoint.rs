//! Checkpoint Files
//!
//! One text file per filter holding the last confirmed seed number.
//! Writes go to a sibling temp file which is then renamed over the
//! checkpoint, so a crash leaves either the old or the new value.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Checkpoint errors.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    /// Reading or writing the file failed.
    #[error("Checkpoint I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file does not hold a seed number.
    #[error("Malformed checkpoint {path}: {content:?}")]
    Malformed {
        /// File that was read.
        path: PathBuf,
        /// Its trimmed content.
        content: String,
    },
}

/// File name for a filter: `progress_<name>.txt`, spaces as underscores.
pub fn checkpoint_file_name(filter_name: &str) -> String {
    format!("progress_{}.txt", filter_name.replace(' ', "_"))
}

/// Base seed number for a resumed scan: `max(0, saved - margin) + offset`.
pub fn resume_base(saved: u64, margin: u64, offset: u64) -> u64 {
    saved.saturating_sub(margin).saturating_add(offset)
}

/// A filter's checkpoint file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    path: PathBuf,
}

impl Checkpoint {
    /// Checkpoint at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Checkpoint for `filter_name` inside `dir`.
    pub fn for_filter(dir: impl AsRef<Path>, filter_name: &str) -> Self {
        Self::new(dir.as_ref().join(checkpoint_file_name(filter_name)))
    }

    /// Path of the checkpoint file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Saved seed number; `None` when no checkpoint exists yet.
    pub fn load(&self) -> Result<Option<u64>, CheckpointError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let content = text.trim();
        content
            .parse()
            .map(Some)
            .map_err(|_| CheckpointError::Malformed {
                path: self.path.clone(),
                content: content.to_owned(),
            })
    }

    /// Start for a resumed scan, per [`resume_base`]; `None` when
    /// nothing has been saved.
    pub fn resume_start(&self, margin: u64, offset: u64) -> Result<Option<u64>, CheckpointError> {
        Ok(self
            .load()?
            .map(|saved| resume_base(saved, margin, offset)))
    }

    /// Replace the saved seed number.
    pub fn save(&self, seed_number: u64) -> Result<(), CheckpointError> {
        let temp = self.temp_path();
        fs::write(&temp, format!("{seed_number}\n"))?;
        fs::rename(&temp, &self.path)?;
        debug!("Checkpoint {} -> {}", self.path.display(), seed_number);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(
            checkpoint_file_name("Perkeo Filter"),
            "progress_Perkeo_Filter.txt"
        );
        assert_eq!(
            checkpoint_file_name("Any Legendary Filter"),
            "progress_Any_Legendary_Filter.txt"
        );
    }

    #[test]
    fn test_resume_base() {
        assert_eq!(resume_base(1_000, 100, 0), 900);
        assert_eq!(resume_base(1_000, 100, 5), 905);
        assert_eq!(resume_base(50, 100, 0), 0);
        assert_eq!(resume_base(50, 100, 7), 7);
        assert_eq!(resume_base(u64::MAX, 0, 1), u64::MAX);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = Checkpoint::for_filter(dir.path(), "Charm Tag Filter");
        assert_eq!(checkpoint.load().unwrap(), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = Checkpoint::for_filter(dir.path(), "Charm Tag Filter");
        checkpoint.save(123_456).unwrap();
        assert_eq!(checkpoint.load().unwrap(), Some(123_456));

        checkpoint.save(123_999).unwrap();
        assert_eq!(checkpoint.load().unwrap(), Some(123_999));
        assert!(!checkpoint.temp_path().exists());
        assert_eq!(
            checkpoint.path().file_name().unwrap(),
            "progress_Charm_Tag_Filter.txt"
        );
    }

    #[test]
    fn test_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = Checkpoint::new(dir.path().join("progress.txt"));
        fs::write(checkpoint.path(), "AAAAAAAA").unwrap();
        assert!(matches!(
            checkpoint.load(),
            Err(CheckpointError::Malformed { .. })
        ));
    }
}
