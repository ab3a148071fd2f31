//! Comparison of one project's findings across two instances.
//!
//! Each pair goes through the same fixed sequence:
//!
//! ```text
//! fetch → normalize → sort → serialize → canonicalize → diff → report
//! ```
//!
//! Normalization runs before sorting on both sides, and both sides are
//! sorted with the same comparator.

mod canonical;
mod comparator;
mod diff;
mod normalize;
mod outcome;
mod sort;

pub use canonical::{Canonicalizer, JsonCanonicalizer, fingerprint};
pub use comparator::{FindingsComparator, PairComparator};
pub use diff::{DiffOutcome, JsonLineDiff, StructuralDiff};
pub use normalize::{normalize_finding, normalize_findings};
pub use outcome::{ComparisonOutcome, FailureStage, PairResult};
pub use sort::{compare_findings, sort_findings};
