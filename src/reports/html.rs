//! Per-project HTML diff reports.

use super::escape::escape_html;
use crate::error::{CompareError, ReportErrorKind, Result};
use crate::model::ProjectIdentity;
use std::path::PathBuf;

/// File name for a project's diff report: `{name}_{version}.html` with every
/// `/` replaced by `-`.
///
/// ```
/// use dt_compare::model::ProjectIdentity;
/// use dt_compare::reports::report_file_name;
///
/// assert_eq!(report_file_name(&ProjectIdentity::new("group/app", "3.0")), "group-app_3.0.html");
/// ```
#[must_use]
pub fn report_file_name(identity: &ProjectIdentity) -> String {
    format!("{}_{}.html", identity.name, identity.version).replace('/', "-")
}

/// Wrap a diff rendering in a minimal preformatted HTML block.
#[must_use]
pub fn render_html(rendering: &str) -> String {
    format!("<pre>{}</pre>", escape_html(rendering))
}

/// Writes diff reports into an output directory.
#[derive(Debug, Clone)]
pub struct DiffReportWriter {
    out_dir: PathBuf,
}

impl DiffReportWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Path the report for `identity` is written to.
    #[must_use]
    pub fn report_path(&self, identity: &ProjectIdentity) -> PathBuf {
        self.out_dir.join(report_file_name(identity))
    }

    /// Persist `rendering` for `identity`, overwriting any previous report.
    pub fn write(&self, identity: &ProjectIdentity, rendering: &str) -> Result<PathBuf> {
        let path = self.report_path(identity);
        std::fs::write(&path, render_html(rendering)).map_err(|e| {
            CompareError::report(
                format!("diff report for {identity}"),
                ReportErrorKind::Write {
                    path: path.clone(),
                    message: e.to_string(),
                },
            )
        })?;
        tracing::debug!("Diff report written to {:?}", path);
        Ok(path)
    }
}
