//! Run-level summary of a comparison.

use super::exit_codes;
use crate::compare::{ComparisonOutcome, PairResult};
use crate::matching::{MatchFailure, MatchReport};
use crate::model::ProjectIdentity;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub equal: usize,
    pub different: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl OutcomeCounts {
    fn tally(results: &[PairResult]) -> Self {
        let mut counts = Self::default();
        for result in results {
            match result.outcome {
                ComparisonOutcome::Equal { .. } => counts.equal += 1,
                ComparisonOutcome::Different { .. } => counts.different += 1,
                ComparisonOutcome::Skipped { .. } => counts.skipped += 1,
                ComparisonOutcome::Failed { .. } => counts.failed += 1,
            }
        }
        counts
    }

    #[must_use]
    pub const fn compared(&self) -> usize {
        self.equal + self.different + self.skipped + self.failed
    }
}

/// Everything a run produced, serializable to `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub source_url: String,
    pub target_url: String,
    pub projects_in_source: usize,
    pub counts: OutcomeCounts,
    pub unmatched: Vec<ProjectIdentity>,
    pub match_failures: Vec<MatchFailure>,
    pub results: Vec<PairResult>,
}

impl RunSummary {
    /// Build a summary; results are ordered by project identity so the
    /// serialized form does not depend on worker scheduling.
    pub fn new(
        started_at: DateTime<Utc>,
        source_url: impl Into<String>,
        target_url: impl Into<String>,
        projects_in_source: usize,
        matching: MatchReport,
        mut results: Vec<PairResult>,
    ) -> Self {
        results.sort_by(|a, b| a.project.cmp(&b.project));
        Self {
            started_at,
            finished_at: Utc::now(),
            source_url: source_url.into(),
            target_url: target_url.into(),
            projects_in_source,
            counts: OutcomeCounts::tally(&results),
            unmatched: matching.unmatched,
            match_failures: matching.failures,
            results,
        }
    }

    #[must_use]
    pub fn has_differences(&self) -> bool {
        self.counts.different > 0
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.counts.failed > 0 || !self.match_failures.is_empty()
    }

    pub fn log_summary(&self) {
        let elapsed = self.finished_at - self.started_at;
        tracing::info!(
            "compared {} of {} projects in {}ms: {} equal, {} different, {} skipped, {} failed",
            self.counts.compared(),
            self.projects_in_source,
            elapsed.num_milliseconds(),
            self.counts.equal,
            self.counts.different,
            self.counts.skipped,
            self.counts.failed
        );
        if !self.unmatched.is_empty() {
            tracing::info!("{} projects not present in {}", self.unmatched.len(), self.target_url);
        }
        if !self.match_failures.is_empty() {
            tracing::warn!("{} project lookups failed", self.match_failures.len());
        }
    }

    /// Process exit code. Without `fail_on_difference` a completed run
    /// always succeeds.
    #[must_use]
    pub fn exit_code(&self, fail_on_difference: bool) -> i32 {
        if !fail_on_difference {
            exit_codes::SUCCESS
        } else if self.has_failures() {
            exit_codes::ERROR
        } else if self.has_differences() {
            exit_codes::DIFFERENCES_FOUND
        } else {
            exit_codes::SUCCESS
        }
    }
}
