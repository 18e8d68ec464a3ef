//! Match Log
//!
//! Append-only CSV of matching seeds, shared by all workers behind a
//! mutex and flushed after every row.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

/// CSV header row.
pub const MATCH_LOG_HEADER: &str = "seed,match_level,tier_name";

/// Default file name, stamped with the local time.
pub fn match_log_file_name() -> String {
    Local::now().format("matches_%Y%m%d_%H%M%S.csv").to_string()
}

/// Thread-safe CSV sink.
pub struct MatchLog {
    path: Option<PathBuf>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for MatchLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchLog").field("path", &self.path).finish()
    }
}

impl MatchLog {
    /// Create (truncate) a log file and write the header.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut log = Self::from_writer(BufWriter::new(file))?;
        log.path = Some(path.to_path_buf());
        Ok(log)
    }

    /// Log into any writer; the header is written immediately.
    pub fn from_writer(writer: impl Write + Send + 'static) -> io::Result<Self> {
        let mut writer: Box<dyn Write + Send> = Box::new(writer);
        writeln!(writer, "{MATCH_LOG_HEADER}")?;
        writer.flush()?;
        Ok(Self {
            path: None,
            writer: Mutex::new(writer),
        })
    }

    /// File backing the log, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append one match and flush.
    pub fn record(&self, seed: &str, tier: u32, tier_name: &str) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{seed},{tier},{}", csv_field(tier_name))?;
        writer.flush()
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_name_format() {
        let name = match_log_file_name();
        assert!(name.starts_with("matches_"));
        assert!(name.ends_with(".csv"));
        // matches_YYYYMMDD_HHMMSS.csv
        assert_eq!(name.len(), "matches_".len() + 15 + ".csv".len());
    }

    #[test]
    fn test_rows_are_flushed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.csv");
        let log = MatchLog::create(&path).unwrap();
        log.record("AAAAAIGP", 1, "Perkeo").unwrap();
        log.record("AAAAAC5M", 3, "Perkeo + Triboulet + Yorick").unwrap();

        // Still open; rows must already be on disk.
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], MATCH_LOG_HEADER);
        assert_eq!(lines[1], "AAAAAIGP,1,Perkeo");
        assert_eq!(lines[2], "AAAAAC5M,3,Perkeo + Triboulet + Yorick");
        assert_eq!(log.path(), Some(path.as_path()));
    }

    #[test]
    fn test_csv_quoting() {
        assert_eq!(csv_field("Charm Tag Found"), "Charm Tag Found");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
