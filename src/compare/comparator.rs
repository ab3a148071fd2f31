//! The per-pair comparison procedure.

use super::canonical::{Canonicalizer, JsonCanonicalizer, fingerprint};
use super::diff::{JsonLineDiff, StructuralDiff};
use super::normalize::normalize_findings;
use super::outcome::{ComparisonOutcome, FailureStage};
use super::sort::sort_findings;
use crate::client::{DEFAULT_PAGE_SIZE, Instance, collect_findings};
use crate::error::CompareError;
use crate::model::{ComparisonPair, Finding};
use crate::reports::DiffReportWriter;

/// Compares one [`ComparisonPair`]. Shared by every pool worker.
pub trait PairComparator: Sync {
    fn compare(&self, pair: &ComparisonPair) -> ComparisonOutcome;
}

/// Fetches, normalizes, sorts, canonicalizes and diffs both sides of a pair,
/// writing a report when they differ.
pub struct FindingsComparator<'a> {
    source: &'a dyn Instance,
    target: &'a dyn Instance,
    reports: DiffReportWriter,
    canonicalizer: Box<dyn Canonicalizer>,
    differ: Box<dyn StructuralDiff>,
    page_size: u32,
}

struct StageError {
    stage: FailureStage,
    error: CompareError,
}

impl StageError {
    fn at(stage: FailureStage) -> impl FnOnce(CompareError) -> Self {
        move |error| Self { stage, error }
    }
}

impl<'a> FindingsComparator<'a> {
    pub fn new(
        source: &'a dyn Instance,
        target: &'a dyn Instance,
        reports: DiffReportWriter,
    ) -> Self {
        let differ = JsonLineDiff::new().with_labels(source.base_url(), target.base_url());
        Self {
            source,
            target,
            reports,
            canonicalizer: Box::new(JsonCanonicalizer),
            differ: Box::new(differ),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_canonicalizer(mut self, canonicalizer: Box<dyn Canonicalizer>) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    fn fetch(
        &self,
        instance: &dyn Instance,
        project_uuid: &str,
        stage: FailureStage,
    ) -> Result<Vec<Finding>, StageError> {
        collect_findings(instance, project_uuid, self.page_size).map_err(StageError::at(stage))
    }

    fn canonical_document(&self, findings: &[Finding]) -> Result<Vec<u8>, StageError> {
        let document = serde_json::to_vec(findings)
            .map_err(|e| StageError::at(FailureStage::Serialize)(e.into()))?;
        self.canonicalizer
            .canonicalize(&document)
            .map_err(StageError::at(FailureStage::Canonicalize))
    }

    fn run(&self, pair: &ComparisonPair) -> Result<ComparisonOutcome, StageError> {
        let mut source = self.fetch(self.source, &pair.source().uuid, FailureStage::FetchSource)?;
        let mut target = self.fetch(self.target, &pair.target().uuid, FailureStage::FetchTarget)?;

        normalize_findings(&mut source);
        normalize_findings(&mut target);

        sort_findings(&mut source);
        sort_findings(&mut target);

        let source_canonical = self.canonical_document(&source)?;
        let target_canonical = self.canonical_document(&target)?;

        let diff = self.differ.diff(&source_canonical, &target_canonical);
        let identity = pair.identity();
        if diff.full_match {
            tracing::info!("findings for {} are equal", identity);
            return Ok(ComparisonOutcome::Equal {
                findings: source.len(),
                fingerprint: fingerprint(&source_canonical),
            });
        }

        tracing::info!(
            "findings for {} are different (+{} -{} lines)",
            identity,
            diff.lines_added,
            diff.lines_removed
        );
        let report = self
            .reports
            .write(&identity, &diff.rendering)
            .map_err(StageError::at(FailureStage::WriteReport))?;

        Ok(ComparisonOutcome::Different {
            report,
            lines_added: diff.lines_added,
            lines_removed: diff.lines_removed,
        })
    }
}

impl PairComparator for FindingsComparator<'_> {
    fn compare(&self, pair: &ComparisonPair) -> ComparisonOutcome {
        let identity = pair.identity();
        tracing::info!("comparing findings for {}", identity);

        self.run(pair).unwrap_or_else(|StageError { stage, error }| {
            let instance = match stage {
                FailureStage::FetchSource => Some(self.source.base_url()),
                FailureStage::FetchTarget => Some(self.target.base_url()),
                _ => None,
            };
            match instance {
                Some(url) => tracing::warn!("failed {} for {} from {}: {}", stage, identity, url, error),
                None => tracing::warn!("failed {} for {}: {}", stage, identity, error),
            }
            ComparisonOutcome::Failed {
                stage,
                reason: error.to_string(),
            }
        })
    }
}
