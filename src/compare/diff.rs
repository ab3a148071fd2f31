//! Structural diff between two canonical documents.

use serde_json::Value;
use similar::{ChangeTag, TextDiff};

/// Result of diffing two canonical documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOutcome {
    /// Both documents are byte-identical
    pub full_match: bool,
    /// Human-readable rendering of the differences; empty on a full match
    pub rendering: String,
    pub lines_added: usize,
    pub lines_removed: usize,
}

impl DiffOutcome {
    fn full_match() -> Self {
        Self {
            full_match: true,
            rendering: String::new(),
            lines_added: 0,
            lines_removed: 0,
        }
    }
}

/// Compares two canonical documents.
pub trait StructuralDiff: Send + Sync {
    fn diff(&self, source: &[u8], target: &[u8]) -> DiffOutcome;
}

/// Unchanged lines shown around each change.
const CONTEXT_RADIUS: usize = 3;

/// Unified line diff over the pretty-printed documents.
///
/// Canonical documents are single-line, so both sides are re-indented first;
/// every JSON member then lands on its own line and the diff points at the
/// exact fields that changed.
#[derive(Debug, Clone)]
pub struct JsonLineDiff {
    source_label: String,
    target_label: String,
}

impl Default for JsonLineDiff {
    fn default() -> Self {
        Self {
            source_label: "source".to_string(),
            target_label: "target".to_string(),
        }
    }
}

impl JsonLineDiff {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Label the two sides in the rendered header, e.g. with instance URLs.
    #[must_use]
    pub fn with_labels(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_label = source.into();
        self.target_label = target.into();
        self
    }
}

fn pretty(document: &[u8]) -> String {
    let mut text = serde_json::from_slice::<Value>(document)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| String::from_utf8_lossy(document).into_owned());
    text.push('\n');
    text
}

impl StructuralDiff for JsonLineDiff {
    fn diff(&self, source: &[u8], target: &[u8]) -> DiffOutcome {
        if source == target {
            return DiffOutcome::full_match();
        }

        let old = pretty(source);
        let new = pretty(target);
        let text_diff = TextDiff::from_lines(&old, &new);

        let (mut lines_added, mut lines_removed) = (0, 0);
        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => lines_added += 1,
                ChangeTag::Delete => lines_removed += 1,
                ChangeTag::Equal => {}
            }
        }

        let rendering = text_diff
            .unified_diff()
            .context_radius(CONTEXT_RADIUS)
            .header(&self.source_label, &self.target_label)
            .to_string();

        DiffOutcome {
            full_match: false,
            rendering,
            lines_added,
            lines_removed,
        }
    }
}
