//! In-memory instance backed by canned projects and findings.

use super::{Instance, Page, PageOptions};
use crate::error::{ClientErrorKind, CompareError, Result};
use crate::model::{Finding, Project};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// An [`Instance`] serving fixed data, with optional injected failures.
///
/// ```
/// use dt_compare::client::{Instance, MemoryInstance};
/// use dt_compare::model::{Finding, Project};
///
/// let instance = MemoryInstance::new("memory://a")
///     .with_project(Project::new("u1", "app", "1.0"), vec![Finding::new("libX", "CVE-2020-1")]);
/// assert!(instance.lookup_project("app", "1.0").unwrap().is_some());
/// assert!(instance.lookup_project("tool", "2.0").unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemoryInstance {
    label: String,
    projects: Vec<Project>,
    findings: HashMap<String, Vec<Finding>>,
    failing_lookups: HashSet<(String, String)>,
    failing_findings: HashSet<String>,
    finding_requests: AtomicUsize,
}

impl MemoryInstance {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Add a project and the findings served for its uuid.
    #[must_use]
    pub fn with_project(mut self, project: Project, findings: Vec<Finding>) -> Self {
        self.findings.insert(project.uuid.clone(), findings);
        self.projects.push(project);
        self
    }

    /// Make lookups of `name`/`version` fail with a server error.
    #[must_use]
    pub fn with_failing_lookup(mut self, name: &str, version: &str) -> Self {
        self.failing_lookups
            .insert((name.to_string(), version.to_string()));
        self
    }

    /// Make findings requests for `project_uuid` fail with a server error.
    #[must_use]
    pub fn with_failing_findings(mut self, project_uuid: &str) -> Self {
        self.failing_findings.insert(project_uuid.to_string());
        self
    }

    /// Number of findings pages served so far.
    pub fn finding_requests(&self) -> usize {
        self.finding_requests.load(Ordering::Relaxed)
    }

    fn server_error(context: String) -> CompareError {
        CompareError::client(
            context,
            ClientErrorKind::Api {
                status: 500,
                body: "injected failure".to_string(),
            },
        )
    }
}

fn page_of<T: Clone>(items: &[T], page: PageOptions) -> Page<T> {
    let size = page.page_size.max(1) as usize;
    let start = (page.page_number.saturating_sub(1) as usize).saturating_mul(size);
    Page {
        items: items.iter().skip(start).take(size).cloned().collect(),
        total_count: Some(items.len()),
    }
}

impl Instance for MemoryInstance {
    fn base_url(&self) -> &str {
        &self.label
    }

    fn list_projects(&self, page: PageOptions) -> Result<Page<Project>> {
        Ok(page_of(&self.projects, page))
    }

    fn lookup_project(&self, name: &str, version: &str) -> Result<Option<Project>> {
        if self
            .failing_lookups
            .contains(&(name.to_string(), version.to_string()))
        {
            return Err(Self::server_error(format!("looking up {name}/{version}")));
        }
        Ok(self
            .projects
            .iter()
            .find(|p| p.name == name && p.version_str() == version)
            .cloned())
    }

    fn list_findings(
        &self,
        project_uuid: &str,
        include_suppressed: bool,
        page: PageOptions,
    ) -> Result<Page<Finding>> {
        self.finding_requests.fetch_add(1, Ordering::Relaxed);
        if self.failing_findings.contains(project_uuid) {
            return Err(Self::server_error(format!(
                "fetching findings for {project_uuid}"
            )));
        }

        let findings: Vec<Finding> = self
            .findings
            .get(project_uuid)
            .map(|all| {
                all.iter()
                    .filter(|f| include_suppressed || !f.analysis.is_suppressed)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(page_of(&findings, page))
    }
}
