//! Pairing source projects with their target counterparts.

use crate::client::Instance;
use crate::model::{ComparisonPair, Project, ProjectIdentity};
use serde::Serialize;

/// A lookup that failed for a reason other than "not found".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchFailure {
    pub project: ProjectIdentity,
    pub reason: String,
}

/// Result of matching every source project against the target instance.
#[derive(Debug, Default)]
pub struct MatchReport {
    /// Matched pairs, in source enumeration order
    pub pairs: Vec<ComparisonPair>,
    /// Source projects absent from the target
    pub unmatched: Vec<ProjectIdentity>,
    /// Lookups that errored; those projects are not compared
    pub failures: Vec<MatchFailure>,
}

impl MatchReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Look up every source project in `target` by (name, version).
///
/// A not-found lookup is expected and only logged at debug level. Any other
/// lookup error is logged, recorded, and does not stop the remaining lookups.
pub fn match_projects(target: &dyn Instance, projects: Vec<Project>) -> MatchReport {
    let mut report = MatchReport::default();

    for project in projects {
        let identity = project.identity();
        match target.lookup_project(&identity.name, &identity.version) {
            Ok(Some(counterpart)) => match ComparisonPair::new(project, counterpart) {
                Some(pair) => report.pairs.push(pair),
                None => {
                    tracing::warn!(
                        "lookup of {} in {} returned a different project",
                        identity,
                        target.base_url()
                    );
                    report.failures.push(MatchFailure {
                        project: identity,
                        reason: "lookup returned a project with a different name or version"
                            .to_string(),
                    });
                }
            },
            Ok(None) => {
                tracing::debug!("{} not found in {}", identity, target.base_url());
                report.unmatched.push(identity);
            }
            Err(e) => {
                tracing::warn!("failed to lookup project {}: {}", identity, e);
                report.failures.push(MatchFailure {
                    project: identity,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}
