//! Scan Engine
//!
//! Runs a seed filter across a range of seed numbers on every core.
//!
//! ## Module Structure
//!
//! - `filter`: The filter contract and a function-backed filter
//! - `filters`: Built-in legendary and Charm Tag filters
//! - `stats`: Atomic progress counters and snapshots
//! - `checkpoint`: Crash-safe progress file and resume arithmetic
//! - `matchlog`: Flushed CSV log of matching seeds
//! - `scanner`: Strided worker threads and the progress reporter

pub mod checkpoint;
pub mod filter;
pub mod filters;
pub mod matchlog;
pub mod scanner;
pub mod stats;

// Re-export key types
pub use checkpoint::{checkpoint_file_name, resume_base, Checkpoint, CheckpointError};
pub use filter::{FnFilter, SeedFilter};
pub use filters::{builtin, soul_step, SoulStep, BUILTIN_FILTERS};
pub use matchlog::{match_log_file_name, MatchLog};
pub use scanner::{
    default_checkpoint, worker_numbers, ScanConfig, ScanError, ScanMatch, ScanReport, Scanner,
    WorkerState,
};
pub use stats::{ProgressSnapshot, ScanProgress};
