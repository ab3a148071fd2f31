//! Data model for Dependency-Track projects and findings.
//!
//! These types mirror the JSON returned by the Dependency-Track REST API.
//! Field order in each struct is the serialization order, so the structs
//! double as the stable document shape fed to canonicalization.

mod finding;
mod project;

pub use finding::*;
pub use project::*;
