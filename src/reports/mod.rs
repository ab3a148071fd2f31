//! Report output: per-project HTML diff reports and the JSON run summary.
//!
//! # Security
//!
//! Diff renderings contain data taken from the instances (component names,
//! titles, descriptions). Everything embedded in HTML goes through
//! [`escape::escape_html`].

pub mod escape;
mod html;
mod summary;

pub use html::{DiffReportWriter, render_html, report_file_name};
pub use summary::{SUMMARY_FILE_NAME, write_summary};
