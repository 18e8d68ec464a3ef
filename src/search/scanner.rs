//! Parallel Seed Scanner
//!
//! Worker `i` of `n` evaluates seed numbers `start + i`, `start + i + n`,
//! ... below `end`. Workers share nothing but the progress counters, the
//! match log and the stop flags; each builds a fresh instance per seed
//! inside the filter call. A reporter thread logs progress on a fixed
//! interval and writes the checkpoint on a longer one.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::core::{number_to_seed, SEED_SPACE};
use crate::game::{EngineConfig, SharedConfig};

use super::checkpoint::Checkpoint;
use super::filter::SeedFilter;
use super::matchlog::MatchLog;
use super::stats::{format_eta, ProgressSnapshot, ScanProgress};

/// Reporter wake-up granularity.
const REPORTER_TICK: Duration = Duration::from_millis(20);

/// Scan configuration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Worker thread count.
    pub threads: usize,
    /// First seed number.
    pub start: u64,
    /// Exclusive end seed number.
    pub end: u64,
    /// Stop every worker once a seed reaches this tier.
    pub stop_at_tier: Option<u32>,
    /// Time between progress reports.
    pub report_interval: Duration,
    /// Time between checkpoint writes.
    pub checkpoint_interval: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get().max(1),
            start: 0,
            end: SEED_SPACE,
            stop_at_tier: None,
            report_interval: Duration::from_secs(5),
            checkpoint_interval: Duration::from_secs(60),
        }
    }
}

/// Scan errors.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Zero worker threads requested.
    #[error("Scan needs at least one thread")]
    NoThreads,

    /// Start lies beyond end.
    #[error("Start seed number {start} is past end {end}")]
    InvalidRange {
        /// Requested start.
        start: u64,
        /// Requested end.
        end: u64,
    },

    /// End lies beyond the seed space.
    #[error("End seed number {0} is past the seed space")]
    EndOutOfRange(u64),

    /// A worker panicked.
    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),
}

/// Per-worker lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WorkerState {
    /// Not started.
    Idle,
    /// Evaluating seeds.
    Scanning,
    /// Hit the stop tier.
    Found,
    /// Ran past the end of its stride.
    Exhausted,
    /// Stopped by cancellation or another worker's find.
    Interrupted,
}

/// A seed that reached the stop tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanMatch {
    /// Seed text.
    pub seed: String,
    /// Seed number.
    pub number: u64,
    /// Tier reached.
    pub tier: u32,
}

/// Outcome of a scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Final progress.
    pub snapshot: ProgressSnapshot,
    /// Final state of each worker.
    pub workers: Vec<WorkerState>,
    /// Seed that stopped the scan, if any.
    pub found: Option<ScanMatch>,
}

impl ScanReport {
    /// Overall state: `Found` beats `Interrupted` beats `Exhausted`.
    pub fn state(&self) -> WorkerState {
        if self.found.is_some() {
            WorkerState::Found
        } else if self.workers.contains(&WorkerState::Interrupted) {
            WorkerState::Interrupted
        } else {
            WorkerState::Exhausted
        }
    }
}

/// Seed numbers visited by one worker.
pub fn worker_numbers(
    start: u64,
    end: u64,
    threads: usize,
    worker: usize,
) -> impl Iterator<Item = u64> {
    (start.saturating_add(worker as u64)..end).step_by(threads.max(1))
}

/// Shared state for one run.
/// Keeps the higher tier, then the lower seed number. Returns true if
/// `candidate` replaced the current find.
fn offer_find(found: &Mutex<Option<ScanMatch>>, candidate: ScanMatch) -> bool {
    let mut found = found.lock();
    let better = found.as_ref().map_or(true, |prev| {
        (candidate.tier, prev.number) > (prev.tier, candidate.number)
    });
    if better {
        *found = Some(candidate);
    }
    better
}

struct RunState<'a> {
    filter: &'a dyn SeedFilter,
    progress: ScanProgress,
    stop: AtomicBool,
    finished: AtomicBool,
    found: Mutex<Option<ScanMatch>>,
}

/// Parallel scanner.
#[derive(Debug)]
pub struct Scanner {
    config: ScanConfig,
    cancel: Arc<AtomicBool>,
    match_log: Option<MatchLog>,
    checkpoint: Option<Checkpoint>,
}

impl Scanner {
    /// Create a scanner after checking the configuration.
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        if config.threads == 0 {
            return Err(ScanError::NoThreads);
        }
        if config.end > SEED_SPACE {
            return Err(ScanError::EndOutOfRange(config.end));
        }
        if config.start > config.end {
            return Err(ScanError::InvalidRange {
                start: config.start,
                end: config.end,
            });
        }
        Ok(Self {
            config,
            cancel: Arc::new(AtomicBool::new(false)),
            match_log: None,
            checkpoint: None,
        })
    }

    /// Log matches to `log`.
    pub fn with_match_log(mut self, log: MatchLog) -> Self {
        self.match_log = Some(log);
        self
    }

    /// Persist progress to `checkpoint`.
    pub fn with_checkpoint(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Scan configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Flag that stops the scan when set. Workers finish their current
    /// seed first.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    // -------------------------------------------------------------------------
    // Run
    // -------------------------------------------------------------------------

    /// Scan `[start, end)` with `filter` and block until every worker stops.
    #[instrument(skip_all, fields(filter = filter.name()))]
    pub fn run(
        &self,
        filter: &dyn SeedFilter,
        engine: &SharedConfig,
    ) -> Result<ScanReport, ScanError> {
        let ScanConfig {
            threads,
            start,
            end,
            ..
        } = self.config;
        info!(
            "Scanning with {} ({} threads, seeds {}..{})",
            filter.name(),
            threads,
            start,
            end
        );

        let run = RunState {
            filter,
            progress: ScanProgress::new(start, end, threads, filter.max_tier()),
            stop: AtomicBool::new(false),
            finished: AtomicBool::new(false),
            found: Mutex::new(None),
        };

        let workers = thread::scope(|scope| {
            let reporter = scope.spawn(|| self.report_loop(&run));

            let handles: Vec<_> = (0..threads)
                .map(|id| {
                    let run = &run;
                    let engine = engine.snapshot();
                    scope.spawn(move || self.worker(id, run, &engine))
                })
                .collect();

            let states: Result<Vec<_>, _> = handles
                .into_iter()
                .enumerate()
                .map(|(id, handle)| handle.join().map_err(|_| ScanError::WorkerPanicked(id)))
                .collect();

            run.finished.store(true, Ordering::Release);
            if reporter.join().is_err() {
                warn!("Progress reporter panicked");
            }
            states
        })?;

        self.save_checkpoint(&run.progress);
        let snapshot = run.progress.snapshot();
        self.log_snapshot(filter, &snapshot);

        let report = ScanReport {
            snapshot,
            workers,
            found: run.found.lock().take(),
        };
        info!("Scan finished: {:?}", report.state());
        Ok(report)
    }

    fn interrupted(&self, run: &RunState<'_>) -> bool {
        self.cancel.load(Ordering::Acquire) || run.stop.load(Ordering::Acquire)
    }

    fn worker(&self, id: usize, run: &RunState<'_>, engine: &EngineConfig) -> WorkerState {
        let ScanConfig {
            threads,
            start,
            end,
            stop_at_tier,
            ..
        } = self.config;
        let stride = threads as u64;
        let mut state = WorkerState::Idle;
        debug!("Worker {} {:?} at {}", id, state, start.saturating_add(id as u64));

        for number in worker_numbers(start, end, threads, id) {
            if self.interrupted(run) {
                run.progress.advance(id, number);
                state = WorkerState::Interrupted;
                break;
            }
            state = WorkerState::Scanning;

            let Some(seed) = number_to_seed(number) else {
                break;
            };
            let tier = run.filter.apply(seed.as_str(), engine);
            run.progress.record(tier);

            if tier > 0 {
                self.log_match(run.filter, seed.as_str(), tier);
                if stop_at_tier.is_some_and(|stop| tier >= stop) {
                    self.claim_find(run, seed.as_str(), number, tier, engine);
                    run.progress.advance(id, number.saturating_add(stride));
                    state = WorkerState::Found;
                    break;
                }
            }
            run.progress.advance(id, number.saturating_add(stride));
        }

        if !matches!(state, WorkerState::Found | WorkerState::Interrupted) {
            run.progress.advance(id, end);
            state = WorkerState::Exhausted;
        }
        debug!("Worker {} {:?}", id, state);
        state
    }

    fn claim_find(
        &self,
        run: &RunState<'_>,
        seed: &str,
        number: u64,
        tier: u32,
        engine: &EngineConfig,
    ) {
        run.stop.store(true, Ordering::Release);
        // Describing re-simulates the seed; keep it off the lock.
        let details = run.filter.describe(seed, engine);
        let candidate = ScanMatch {
            seed: seed.to_owned(),
            number,
            tier,
        };
        if !offer_find(&run.found, candidate) {
            return;
        }
        info!(
            "Found {} at tier {} ({})",
            seed,
            tier,
            run.filter.tier_name(tier).unwrap_or("?")
        );
        if let Some(details) = details {
            info!("{}", details);
        }
    }

    fn log_match(&self, filter: &dyn SeedFilter, seed: &str, tier: u32) {
        let Some(log) = &self.match_log else {
            return;
        };
        let name = filter.tier_name(tier).unwrap_or("");
        if let Err(e) = log.record(seed, tier, name) {
            warn!("Failed to log match {}: {}", seed, e);
        }
    }

    // -------------------------------------------------------------------------
    // Reporting
    // -------------------------------------------------------------------------

    fn report_loop(&self, run: &RunState<'_>) {
        let mut last_report = Instant::now();
        let mut last_checkpoint = Instant::now();

        while !run.finished.load(Ordering::Acquire) {
            thread::sleep(REPORTER_TICK);
            if last_report.elapsed() >= self.config.report_interval {
                self.log_snapshot(run.filter, &run.progress.snapshot());
                last_report = Instant::now();
            }
            if last_checkpoint.elapsed() >= self.config.checkpoint_interval {
                self.save_checkpoint(&run.progress);
                last_checkpoint = Instant::now();
            }
        }
    }

    fn log_snapshot(&self, filter: &dyn SeedFilter, snapshot: &ProgressSnapshot) {
        let eta = snapshot
            .eta_secs
            .map_or_else(|| "calculating".to_string(), format_eta);
        info!(
            "{} | {} seeds | {:.0} seeds/s | {:.6}% | at {} | ETA {}",
            filter.name(),
            snapshot.evaluated,
            snapshot.rate,
            snapshot.percent,
            snapshot.current_seed,
            eta
        );
        for (index, count) in snapshot.tier_counts.iter().enumerate() {
            let tier = index as u32 + 1;
            let name = filter.tier_name(tier).unwrap_or("?");
            match snapshot.one_in(tier) {
                Some(one_in) => info!("  {}: {} (1 in {})", name, count, one_in),
                None => info!("  {}: {}", name, count),
            }
        }
    }

    fn save_checkpoint(&self, progress: &ScanProgress) {
        let Some(checkpoint) = &self.checkpoint else {
            return;
        };
        if let Err(e) = checkpoint.save(progress.checkpoint()) {
            warn!("Failed to write {}: {}", checkpoint.path().display(), e);
        }
    }
}

/// Default checkpoint location for a filter in the working directory.
pub fn default_checkpoint(filter: &dyn SeedFilter) -> Checkpoint {
    Checkpoint::for_filter(PathBuf::from("."), filter.name())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed_to_number;
    use crate::search::filters::{any_legendary_filter, charm_tag_filter};
    use serde_json::Value;
    use std::sync::atomic::AtomicUsize;
    use std::collections::BTreeSet;
    use std::fs;

    fn quick(threads: usize, start: u64, end: u64) -> ScanConfig {
        ScanConfig {
            threads,
            start,
            end,
            report_interval: Duration::from_millis(50),
            checkpoint_interval: Duration::from_millis(50),
            ..ScanConfig::default()
        }
    }

    /// Records every seed number it sees.
    struct Recorder {
        seen: Mutex<Vec<u64>>,
        tiers: Vec<String>,
    }

    impl SeedFilter for Recorder {
        fn name(&self) -> &str {
            "Recorder"
        }

        fn tier_names(&self) -> &[String] {
            &self.tiers
        }

        fn apply(&self, seed: &str, _config: &EngineConfig) -> u32 {
            self.seen.lock().push(seed_to_number(seed));
            0
        }
    }

    #[test]
    fn test_scan_config_default() {
        let config = ScanConfig::default();
        assert!(config.threads >= 1);
        assert_eq!(config.start, 0);
        assert_eq!(config.end, SEED_SPACE);
        assert!(config.stop_at_tier.is_none());
        assert!(config.checkpoint_interval > config.report_interval);
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(matches!(Scanner::new(quick(0, 0, 10)), Err(ScanError::NoThreads)));
        assert!(matches!(
            Scanner::new(quick(2, 10, 5)),
            Err(ScanError::InvalidRange { start: 10, end: 5 })
        ));
        assert!(matches!(
            Scanner::new(quick(2, 0, SEED_SPACE + 1)),
            Err(ScanError::EndOutOfRange(_))
        ));
    }

    #[test]
    fn test_worker_numbers_partition() {
        for end in [0u64, 1, 37, 1_000] {
            let mut all = Vec::new();
            for worker in 0..4 {
                let numbers: Vec<u64> = worker_numbers(0, end, 4, worker).collect();
                assert!(numbers.iter().all(|n| n % 4 == worker as u64));
                all.extend(numbers);
            }
            all.sort_unstable();
            assert_eq!(all, (0..end).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_every_seed_evaluated_once() {
        let recorder = Recorder {
            seen: Mutex::new(Vec::new()),
            tiers: vec![],
        };
        let scanner = Scanner::new(quick(4, 10, 210)).unwrap();
        let report = scanner.run(&recorder, &SharedConfig::default()).unwrap();

        let mut seen = recorder.seen.into_inner();
        seen.sort_unstable();
        assert_eq!(seen, (10..210).collect::<Vec<_>>());
        assert_eq!(report.snapshot.evaluated, 200);
        assert_eq!(report.snapshot.checkpoint, 210);
        assert_eq!(report.workers, vec![WorkerState::Exhausted; 4]);
        assert_eq!(report.state(), WorkerState::Exhausted);
    }

    #[test]
    fn test_charm_scan_logs_matches() {
        // These values must never change!
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("matches.csv");
        let scanner = Scanner::new(quick(4, 0, 34))
            .unwrap()
            .with_match_log(MatchLog::create(&log_path).unwrap());
        let report = scanner
            .run(&charm_tag_filter(), &SharedConfig::default())
            .unwrap();

        assert_eq!(report.snapshot.tier_counts, vec![3]);
        let text = fs::read_to_string(&log_path).unwrap();
        let seeds: BTreeSet<&str> = text
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(
            seeds,
            BTreeSet::from(["AAAAAAAD", "AAAAAAAU", "AAAAAAA8"])
        );
        assert!(text.contains("AAAAAAAD,1,Charm Tag Found"));
    }

    #[test]
    fn test_charm_rate_first_thousand() {
        // These values must never change!
        let scanner = Scanner::new(quick(3, 0, 1_000)).unwrap();
        let report = scanner
            .run(&charm_tag_filter(), &SharedConfig::default())
            .unwrap();
        assert_eq!(report.snapshot.evaluated, 1_000);
        assert_eq!(report.snapshot.tier_counts, vec![77]);
    }

    #[test]
    fn test_stop_at_tier() {
        let config = ScanConfig {
            stop_at_tier: Some(3),
            ..quick(2, 3_300, 3_400)
        };
        let scanner = Scanner::new(config).unwrap();
        let report = scanner
            .run(&any_legendary_filter(), &SharedConfig::default())
            .unwrap();

        let found = report.found.clone().unwrap();
        assert_eq!(found.seed, "AAAAAC5M");
        assert_eq!(found.number, 3_310);
        assert_eq!(found.tier, 3);
        assert_eq!(report.state(), WorkerState::Found);
        assert!(report.workers.contains(&WorkerState::Found));
        assert!(report.snapshot.checkpoint <= 3_312);
    }

    #[test]
    fn test_offer_find_ordering() {
        let found = Mutex::new(None);
        let at = |number: u64, tier: u32| ScanMatch {
            seed: String::new(),
            number,
            tier,
        };
        assert!(offer_find(&found, at(50, 1)));
        assert!(!offer_find(&found, at(60, 1)));
        assert!(offer_find(&found, at(40, 1)));
        assert!(offer_find(&found, at(90, 2)));
        assert!(!offer_find(&found, at(10, 1)));
        assert!(!offer_find(&found, at(90, 2)));
        assert!(!found.is_locked());
        let best = found.into_inner().unwrap();
        assert_eq!((best.number, best.tier), (90, 2));
    }

    /// Matches one seed number and counts describe calls.
    struct Describing {
        target: u64,
        tiers: Vec<String>,
        described: AtomicUsize,
    }

    impl SeedFilter for Describing {
        fn name(&self) -> &str {
            "Describing"
        }

        fn tier_names(&self) -> &[String] {
            &self.tiers
        }

        fn apply(&self, seed: &str, _config: &EngineConfig) -> u32 {
            u32::from(seed_to_number(seed) == self.target)
        }

        fn describe(&self, seed: &str, _config: &EngineConfig) -> Option<Value> {
            self.described.fetch_add(1, Ordering::Relaxed);
            Some(serde_json::json!({ "seed": seed }))
        }
    }

    #[test]
    fn test_stop_describes_find() {
        let filter = Describing {
            target: 120,
            tiers: vec!["Hit".to_string()],
            described: AtomicUsize::new(0),
        };
        let config = ScanConfig {
            stop_at_tier: Some(1),
            ..quick(4, 100, 200)
        };
        let report = Scanner::new(config)
            .unwrap()
            .run(&filter, &SharedConfig::default())
            .unwrap();

        let found = report.found.unwrap();
        assert_eq!(found.number, 120);
        assert_eq!(found.tier, 1);
        assert_eq!(filter.described.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_cancel_before_run() {
        let scanner = Scanner::new(quick(2, 0, 1_000)).unwrap();
        scanner.cancel();
        let report = scanner
            .run(&charm_tag_filter(), &SharedConfig::default())
            .unwrap();
        assert_eq!(report.snapshot.evaluated, 0);
        assert_eq!(report.snapshot.checkpoint, 0);
        assert_eq!(report.workers, vec![WorkerState::Interrupted; 2]);
        assert_eq!(report.state(), WorkerState::Interrupted);
    }

    #[test]
    fn test_checkpoint_and_resume() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = Checkpoint::for_filter(dir.path(), "Charm Tag Filter");

        let scanner = Scanner::new(quick(4, 0, 20))
            .unwrap()
            .with_checkpoint(checkpoint.clone());
        scanner
            .run(&charm_tag_filter(), &SharedConfig::default())
            .unwrap();
        assert_eq!(checkpoint.load().unwrap(), Some(20));

        // Resume 5 seeds back, 2 forward: 17.
        let start = checkpoint.resume_start(5, 2).unwrap().unwrap();
        assert_eq!(start, 17);
        let scanner = Scanner::new(quick(4, start, 34))
            .unwrap()
            .with_checkpoint(checkpoint.clone());
        let report = scanner
            .run(&charm_tag_filter(), &SharedConfig::default())
            .unwrap();
        assert_eq!(report.snapshot.evaluated, 17);
        assert_eq!(report.snapshot.tier_counts, vec![2]);
        assert_eq!(checkpoint.load().unwrap(), Some(34));
    }

    #[test]
    fn test_default_checkpoint_name() {
        let checkpoint = default_checkpoint(&charm_tag_filter());
        assert_eq!(
            checkpoint.path().file_name().unwrap(),
            "progress_Charm_Tag_Filter.txt"
        );
    }
}
