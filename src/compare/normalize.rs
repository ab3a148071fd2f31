//! Stripping of instance-local fields from findings.

use crate::model::Finding;

/// Clear every field whose value differs between instances holding the same
/// logical data: uuids, the component's project back-reference, the
/// attribution timestamp and the matrix key.
///
/// Applied to every element unconditionally; idempotent.
pub fn normalize_findings(findings: &mut [Finding]) {
    for finding in findings.iter_mut() {
        normalize_finding(finding);
    }
}

/// Normalize a single finding in place.
pub fn normalize_finding(finding: &mut Finding) {
    finding.component.uuid = None;
    finding.component.project = None;
    finding.vulnerability.uuid = None;
    finding.attribution.uuid = None;
    finding.attribution.attributed_on = None;
    finding.matrix.clear();
}
