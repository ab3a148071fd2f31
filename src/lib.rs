//! **Reconcile vulnerability findings between two Dependency-Track instances.**
//!
//! `dt-compare` answers one question after a migration or upgrade: does
//! instance B report the same findings as instance A, project by project?
//!
//! For every project in the source instance it looks up the project with the
//! same (name, version) in the target instance, fetches both findings lists,
//! strips instance-local fields, sorts and canonicalizes both documents, and
//! compares them. Differing projects get an HTML diff report.
//!
//! ## Core Concepts & Modules
//!
//! - **[`client`]**: The [`Instance`](client::Instance) trait and its REST
//!   implementation, [`DtrackClient`](client::DtrackClient).
//! - **[`model`]**: [`Project`], [`Finding`] and the [`ComparisonPair`] the
//!   matcher produces.
//! - **[`matching`]**: Pairs source projects with their target counterparts.
//! - **[`compare`]**: The per-pair procedure: normalize, sort, canonicalize,
//!   diff.
//! - **[`pipeline`]**: The bounded worker pool and the run summary.
//! - **[`reports`]**: HTML diff reports and `summary.json`.
//!
//! ## Comparing Two Instances
//!
//! ```no_run
//! use dt_compare::client::{DtrackClient, DtrackClientConfig};
//! use dt_compare::{AppConfig, cli::compare_instances};
//!
//! fn main() -> anyhow::Result<()> {
//!     let a = DtrackClient::new(DtrackClientConfig::new("https://a.example", "key-a"))?;
//!     let b = DtrackClient::new(DtrackClientConfig::new("https://b.example", "key-b"))?;
//!
//!     let summary = compare_instances(&a, &b, &AppConfig::default())?;
//!     println!("{} projects differ", summary.counts.different);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod cli;
pub mod client;
pub mod compare;
pub mod config;
pub mod error;
pub mod matching;
pub mod model;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use client::{DtrackClient, Instance};
pub use compare::{ComparisonOutcome, FindingsComparator, PairComparator, PairResult};
pub use config::{AppConfig, ConfigError, Validatable};
pub use error::{CompareError, ErrorContext, Result};
pub use matching::{MatchReport, match_projects};
pub use model::{ComparisonPair, Finding, Project, ProjectIdentity};
pub use pipeline::{ComparisonPool, RunSummary};
