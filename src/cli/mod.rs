//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs.

mod compare;

pub use compare::{compare_instances, run_compare};
