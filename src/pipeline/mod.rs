//! Run orchestration: the comparison worker pool and the run summary.

mod pool;
mod summary;

pub use pool::{ComparisonPool, DEFAULT_CONCURRENCY};
pub use summary::{OutcomeCounts, RunSummary};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - run completed (or no differences with --fail-on-difference)
    pub const SUCCESS: i32 = 0;
    /// At least one pair differed
    pub const DIFFERENCES_FOUND: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
