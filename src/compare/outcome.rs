//! Per-pair comparison outcomes.

use crate::model::ProjectIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Step of the per-pair procedure at which a comparison failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    FetchSource,
    FetchTarget,
    Serialize,
    Canonicalize,
    WriteReport,
    /// The comparison panicked
    Internal,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FetchSource => "fetching source findings",
            Self::FetchTarget => "fetching target findings",
            Self::Serialize => "serializing findings",
            Self::Canonicalize => "canonicalizing findings",
            Self::WriteReport => "writing diff report",
            Self::Internal => "comparing findings",
        };
        f.write_str(label)
    }
}

/// What happened to one comparison pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    /// Canonical documents were byte-identical
    Equal {
        findings: usize,
        /// xxh3 fingerprint of the canonical document
        fingerprint: String,
    },
    /// Documents differ; a rendered diff was written to `report`
    Different {
        report: PathBuf,
        lines_added: usize,
        lines_removed: usize,
    },
    /// Not compared, e.g. the run was cancelled
    Skipped { reason: String },
    Failed { stage: FailureStage, reason: String },
}

impl ComparisonOutcome {
    #[must_use]
    pub const fn is_equal(&self) -> bool {
        matches!(self, Self::Equal { .. })
    }

    #[must_use]
    pub const fn is_different(&self) -> bool {
        matches!(self, Self::Different { .. })
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Equal { .. } => "equal",
            Self::Different { .. } => "different",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Outcome of one pair, keyed by the shared project identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairResult {
    pub project: ProjectIdentity,
    #[serde(flatten)]
    pub outcome: ComparisonOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_tagged() {
        let result = PairResult {
            project: ProjectIdentity::new("app", "1.0"),
            outcome: ComparisonOutcome::Failed {
                stage: FailureStage::FetchTarget,
                reason: "timeout".to_string(),
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["stage"], "fetch_target");
        assert_eq!(json["project"]["name"], "app");
    }

    #[test]
    fn test_labels() {
        let skipped = ComparisonOutcome::Skipped {
            reason: "cancelled".to_string(),
        };
        assert_eq!(skipped.label(), "skipped");
        assert!(!skipped.is_failed());
        assert_eq!(FailureStage::WriteReport.to_string(), "writing diff report");
    }
}
