//! Balatro Seed Scanner
//!
//! Runs a built-in filter over the seed space on every core, logging
//! matches to a timestamped CSV and checkpointing progress for resume.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use seed_scanner::{
    core::{pseudohash, Seed, SEED_SPACE},
    game::{EngineConfig, SharedConfig},
    search::{
        builtin, default_checkpoint, match_log_file_name, MatchLog, ScanConfig, Scanner,
        SeedFilter, BUILTIN_FILTERS,
    },
    VERSION,
};

/// Scan Balatro seeds with a built-in filter.
#[derive(Parser, Debug)]
#[command(name = "seed-scanner", version, about)]
struct Args {
    /// Filter to run (perkeo, any-legendary, charm-tag).
    #[arg(short, long, default_value = "perkeo")]
    filter: String,

    /// First seed: 8-symbol seed text, or a seed number.
    #[arg(short, long)]
    seed: Option<String>,

    /// Stop before this seed (text or number).
    #[arg(long)]
    end: Option<String>,

    /// Worker threads (defaults to the core count).
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// JSON run configuration (deck, stake, unlocks, ...).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Continue from the filter's checkpoint file.
    #[arg(long)]
    resume: bool,

    /// Seeds to rescan before the checkpoint.
    #[arg(long, default_value_t = 0)]
    resume_margin: u64,

    /// Seeds to skip past the checkpoint.
    #[arg(long, default_value_t = 0)]
    resume_offset: u64,

    /// Stop once a seed reaches this tier.
    #[arg(long)]
    stop_at_tier: Option<u32>,

    /// Print the filter's breakdown for one seed and exit.
    #[arg(long)]
    describe: Option<String>,

    /// Do not write a match log.
    #[arg(long)]
    no_log: bool,

    /// Seconds between progress reports.
    #[arg(long, default_value_t = 5)]
    report_secs: u64,

    /// Seconds between checkpoint writes.
    #[arg(long, default_value_t = 60)]
    checkpoint_secs: u64,
}

/// Seed text if it parses as one, otherwise a seed number.
fn parse_seed_number(text: &str) -> Result<u64> {
    if let Ok(seed) = Seed::parse(text) {
        return Ok(seed.number());
    }
    let number: u64 = text
        .parse()
        .with_context(|| format!("{text:?} is neither a seed nor a seed number"))?;
    if number > SEED_SPACE {
        return Err(anyhow!("seed number {number} is past the seed space ({SEED_SPACE})"));
    }
    Ok(number)
}

/// Half-open scan range; a start past the end is an error, not an empty scan.
fn scan_range(start: u64, end: u64) -> Result<(u64, u64)> {
    if start > end {
        return Err(anyhow!(
            "start seed number {start} is past the end {end}; lower --seed or raise --end"
        ));
    }
    Ok((start, end))
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let config = EngineConfig::from_file(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    config.validate()?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

fn describe(filter: &dyn SeedFilter, text: &str, config: &EngineConfig) -> Result<()> {
    let seed = Seed::parse(text)?;
    let hashed = pseudohash(seed.as_str());
    info!(
        "{} (#{}) pseudohash {} [{}]",
        seed.as_str(),
        seed.number(),
        hashed,
        hex::encode(hashed.to_bits().to_be_bytes())
    );

    let tier = filter.apply(seed.as_str(), config);
    info!(
        "{}: tier {} ({})",
        filter.name(),
        tier,
        filter.tier_name(tier).unwrap_or("no match")
    );
    if let Some(details) = filter.describe(seed.as_str(), config) {
        println!("{}", serde_json::to_string_pretty(&details)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let args = Args::parse();
    info!("Balatro Seed Scanner v{}", VERSION);

    let filter = builtin(&args.filter).ok_or_else(|| {
        anyhow!(
            "unknown filter {:?}; expected one of {:?}",
            args.filter,
            BUILTIN_FILTERS
        )
    })?;
    let engine = load_config(args.config.as_ref())?;

    if let Some(seed) = &args.describe {
        return describe(&filter, seed, &engine);
    }

    let checkpoint = default_checkpoint(&filter);
    let mut start = match &args.seed {
        Some(text) => parse_seed_number(text)?,
        None => 0,
    };
    if args.resume {
        match checkpoint.resume_start(args.resume_margin, args.resume_offset)? {
            Some(resumed) => {
                info!("Resuming from {} ({})", resumed, checkpoint.path().display());
                start = resumed;
            }
            None => warn!(
                "No checkpoint at {}; starting at {}",
                checkpoint.path().display(),
                start
            ),
        }
    }
    let end = match &args.end {
        Some(text) => parse_seed_number(text)?,
        None => SEED_SPACE,
    };
    let (start, end) = scan_range(start, end)?;

    let defaults = ScanConfig::default();
    let config = ScanConfig {
        threads: args.threads.unwrap_or(defaults.threads),
        start,
        end,
        stop_at_tier: args.stop_at_tier,
        report_interval: Duration::from_secs(args.report_secs.max(1)),
        checkpoint_interval: Duration::from_secs(args.checkpoint_secs.max(1)),
    };

    let mut scanner = Scanner::new(config)?.with_checkpoint(checkpoint);
    if !args.no_log {
        let path = match_log_file_name();
        match MatchLog::create(&path) {
            Ok(log) => {
                info!("Logging matches to {}", path);
                scanner = scanner.with_match_log(log);
            }
            Err(e) => warn!("Failed to create match log {}: {}", path, e),
        }
    }

    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        signal_hook::flag::register(signal, scanner.cancel_handle())
            .context("Failed to install signal handler")?;
    }

    let report = scanner.run(&filter, &SharedConfig::new(engine))?;
    info!(
        "{:?} after {} seeds; checkpoint at {}",
        report.state(),
        report.snapshot.evaluated,
        report.snapshot.checkpoint
    );
    if let Some(found) = &report.found {
        println!("{}", found.seed);
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_number() {
        assert_eq!(parse_seed_number("AAAAAAAA").unwrap(), 0);
        assert_eq!(parse_seed_number("AAAAAAAD").unwrap(), 3);
        assert_eq!(parse_seed_number("3310").unwrap(), 3_310);
        // Valid seed text wins over a number reading.
        assert_eq!(
            parse_seed_number("11111111").unwrap(),
            Seed::parse("11111111").unwrap().number()
        );
        assert!(parse_seed_number("AAAA").is_err());
        assert!(parse_seed_number(&(SEED_SPACE + 1).to_string()).is_err());
    }

    #[test]
    fn test_scan_range() {
        assert_eq!(scan_range(0, SEED_SPACE).unwrap(), (0, SEED_SPACE));
        assert_eq!(scan_range(3_310, 3_310).unwrap(), (3_310, 3_310));
        // A checkpoint or --seed past --end must not collapse to an empty scan
        let err = scan_range(5_000, 3_310).unwrap_err();
        assert!(err.to_string().contains("5000"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "seed-scanner",
            "--filter",
            "charm-tag",
            "--seed",
            "AAAAAAAD",
            "-j",
            "2",
            "--resume",
            "--resume-margin",
            "100",
            "--stop-at-tier",
            "1",
        ]);
        assert_eq!(args.filter, "charm-tag");
        assert_eq!(args.threads, Some(2));
        assert!(args.resume);
        assert_eq!(args.resume_margin, 100);
        assert_eq!(args.resume_offset, 0);
        assert_eq!(args.stop_at_tier, Some(1));
    }
}
