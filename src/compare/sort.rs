//! Canonical ordering of findings.

use crate::model::Finding;
use std::cmp::Ordering;

/// Order by component name, then vulnerability id; byte-wise, case-sensitive.
#[must_use]
pub fn compare_findings(a: &Finding, b: &Finding) -> Ordering {
    a.component
        .name
        .as_bytes()
        .cmp(b.component.name.as_bytes())
        .then_with(|| {
            a.vulnerability
                .vuln_id
                .as_bytes()
                .cmp(b.vulnerability.vuln_id.as_bytes())
        })
}

/// Stable sort by [`compare_findings`]; exact ties keep their input order.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(compare_findings);
}
