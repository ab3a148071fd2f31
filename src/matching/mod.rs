//! Project matching across instances.
//!
//! Projects are paired by exact (name, version) identity; nothing fuzzy.

mod projects;

pub use projects::{MatchFailure, MatchReport, match_projects};
