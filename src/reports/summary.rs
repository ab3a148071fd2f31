//! JSON run summary.

use crate::error::{CompareError, ReportErrorKind, Result};
use crate::pipeline::RunSummary;
use std::path::Path;

/// File name of the run summary inside the output directory.
pub const SUMMARY_FILE_NAME: &str = "summary.json";

/// Write `summary` as pretty-printed JSON to `path`.
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(|e| {
        CompareError::report("run summary", ReportErrorKind::JsonSerialization(e.to_string()))
    })?;
    std::fs::write(path, json).map_err(|e| {
        CompareError::report(
            "run summary",
            ReportErrorKind::Write {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        )
    })?;
    tracing::info!("Run summary written to {:?}", path);
    Ok(())
}
