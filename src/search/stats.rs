//! Scan Progress
//!
//! Lock-free counters shared by every worker and read by the reporter.
//! Each worker owns one cursor: the next seed number it will evaluate.
//! The minimum over all cursors is the checkpoint; every seed below it
//! has been evaluated by some worker.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::core::number_to_seed;

/// Shared scan counters.
#[derive(Debug)]
pub struct ScanProgress {
    start: u64,
    end: u64,
    evaluated: AtomicU64,
    tiers: Vec<AtomicU64>,
    cursors: Vec<AtomicU64>,
    started: Instant,
}

impl ScanProgress {
    /// Counters for a scan of `[start, end)` with `workers` cursors
    /// and tiers `1..=max_tier`.
    pub fn new(start: u64, end: u64, workers: usize, max_tier: u32) -> Self {
        let cursors = (0..workers as u64)
            .map(|id| AtomicU64::new(start.saturating_add(id).min(end)))
            .collect();
        let tiers = (0..max_tier).map(|_| AtomicU64::new(0)).collect();
        Self {
            start,
            end,
            evaluated: AtomicU64::new(0),
            tiers,
            cursors,
            started: Instant::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Worker side
    // -------------------------------------------------------------------------

    /// Count one evaluated seed. Tiers above the filter's range count
    /// toward its top tier.
    pub fn record(&self, tier: u32) {
        self.evaluated.fetch_add(1, Ordering::Relaxed);
        if tier == 0 || self.tiers.is_empty() {
            return;
        }
        let index = (tier as usize).min(self.tiers.len()) - 1;
        self.tiers[index].fetch_add(1, Ordering::Relaxed);
    }

    /// Move a worker's cursor to the next seed it will evaluate.
    pub fn advance(&self, worker: usize, next: u64) {
        if let Some(cursor) = self.cursors.get(worker) {
            cursor.store(next.min(self.end), Ordering::Release);
        }
    }

    // -------------------------------------------------------------------------
    // Reader side
    // -------------------------------------------------------------------------

    /// First seed number of the scan.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Exclusive end of the scan.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Seeds evaluated so far.
    pub fn evaluated(&self) -> u64 {
        self.evaluated.load(Ordering::Relaxed)
    }

    /// Matches at `tier` (1-based).
    pub fn tier_count(&self, tier: u32) -> u64 {
        (tier as usize)
            .checked_sub(1)
            .and_then(|index| self.tiers.get(index))
            .map_or(0, |count| count.load(Ordering::Relaxed))
    }

    /// Lowest seed number not yet known to be evaluated.
    pub fn checkpoint(&self) -> u64 {
        self.cursors
            .iter()
            .map(|cursor| cursor.load(Ordering::Acquire))
            .min()
            .unwrap_or(self.end)
    }

    /// Highest cursor; the seed the scan front is at.
    pub fn frontier(&self) -> u64 {
        self.cursors
            .iter()
            .map(|cursor| cursor.load(Ordering::Acquire))
            .max()
            .unwrap_or(self.end)
    }

    /// Time since the counters were created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Point-in-time copy for reporting.
    pub fn snapshot(&self) -> ProgressSnapshot {
        let elapsed = self.elapsed().as_secs_f64();
        let evaluated = self.evaluated();
        let checkpoint = self.checkpoint();
        let rate = if elapsed > 0.0 {
            evaluated as f64 / elapsed
        } else {
            0.0
        };
        let remaining = self.end.saturating_sub(checkpoint);
        let eta_secs = (rate > 0.0).then(|| remaining as f64 / rate);
        let tier_counts = (1..=self.tiers.len() as u32)
            .map(|tier| self.tier_count(tier))
            .collect();

        ProgressSnapshot {
            evaluated,
            checkpoint,
            current_seed: number_to_seed(self.frontier().min(self.end.saturating_sub(1)))
                .map(|seed| seed.as_str().to_owned())
                .unwrap_or_default(),
            percent: if self.end > 0 {
                checkpoint as f64 / self.end as f64 * 100.0
            } else {
                100.0
            },
            rate,
            eta_secs,
            elapsed_secs: elapsed,
            tier_counts,
        }
    }
}

/// Reporter view of [`ScanProgress`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    /// Seeds evaluated.
    pub evaluated: u64,
    /// Low-water mark over worker cursors.
    pub checkpoint: u64,
    /// Seed at the scan front.
    pub current_seed: String,
    /// Checkpoint as a percentage of the scan end.
    pub percent: f64,
    /// Seeds per second.
    pub rate: f64,
    /// Seconds until the end at the current rate.
    pub eta_secs: Option<f64>,
    /// Seconds since the scan began.
    pub elapsed_secs: f64,
    /// Matches per tier, tier 1 first.
    pub tier_counts: Vec<u64>,
}

impl ProgressSnapshot {
    /// Average seeds per match at `tier`, if it has matched.
    pub fn one_in(&self, tier: u32) -> Option<u64> {
        let count = *self.tier_counts.get((tier as usize).checked_sub(1)?)?;
        (count > 0).then(|| self.evaluated / count)
    }
}

/// Format seconds as `"{d}d {h}h {m}m"`.
pub fn format_eta(secs: f64) -> String {
    let minutes = (secs / 60.0) as u64;
    let days = minutes / (60 * 24);
    let hours = (minutes / 60) % 24;
    format!("{}d {}h {}m", days, hours, minutes % 60)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_cursors() {
        let progress = ScanProgress::new(100, 1000, 4, 2);
        assert_eq!(progress.checkpoint(), 100);
        assert_eq!(progress.frontier(), 103);
        assert_eq!(progress.evaluated(), 0);
    }

    #[test]
    fn test_record_tiers() {
        let progress = ScanProgress::new(0, 100, 1, 2);
        progress.record(0);
        progress.record(1);
        progress.record(2);
        progress.record(2);
        progress.record(7);
        assert_eq!(progress.evaluated(), 5);
        assert_eq!(progress.tier_count(0), 0);
        assert_eq!(progress.tier_count(1), 1);
        assert_eq!(progress.tier_count(2), 3);
        assert_eq!(progress.tier_count(3), 0);
    }

    #[test]
    fn test_checkpoint_is_low_water_mark() {
        let progress = ScanProgress::new(0, 100, 3, 1);
        progress.advance(0, 30);
        progress.advance(1, 10);
        progress.advance(2, 50);
        assert_eq!(progress.checkpoint(), 10);
        assert_eq!(progress.frontier(), 50);
        progress.advance(1, 1_000);
        assert_eq!(progress.checkpoint(), 30);
        assert_eq!(progress.frontier(), 100);
    }

    #[test]
    fn test_snapshot() {
        let progress = ScanProgress::new(0, 200, 2, 1);
        for _ in 0..10 {
            progress.record(0);
        }
        progress.record(1);
        progress.advance(0, 50);
        progress.advance(1, 51);

        let snapshot = progress.snapshot();
        assert_eq!(snapshot.evaluated, 11);
        assert_eq!(snapshot.checkpoint, 50);
        assert_eq!(snapshot.current_seed, "AAAAAABS");
        assert!((snapshot.percent - 25.0).abs() < 1e-9);
        assert_eq!(snapshot.tier_counts, vec![1]);
        assert_eq!(snapshot.one_in(1), Some(11));
        assert_eq!(snapshot.one_in(2), None);
    }

    #[test]
    fn test_format_eta() {
        assert_eq!(format_eta(0.0), "0d 0h 0m");
        assert_eq!(format_eta(90_061.0), "1d 1h 1m");
    }
}
