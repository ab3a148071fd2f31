//! Findings: one (component, vulnerability) detection for a project.

use serde::{Deserialize, Deserializer, Serialize};

/// A single finding as returned by `/api/v1/finding/project/{uuid}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Finding {
    pub component: FindingComponent,
    pub vulnerability: FindingVulnerability,
    pub analysis: FindingAnalysis,
    pub attribution: FindingAttribution,
    /// Instance-generated `project:component:vulnerability` uuid triple
    #[serde(deserialize_with = "null_as_default")]
    pub matrix: String,
}

impl Finding {
    /// Minimal finding for a component name and vulnerability id.
    pub fn new(component: impl Into<String>, vuln_id: impl Into<String>) -> Self {
        Self {
            component: FindingComponent {
                name: component.into(),
                ..FindingComponent::default()
            },
            vulnerability: FindingVulnerability {
                vuln_id: vuln_id.into(),
                ..FindingVulnerability::default()
            },
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindingComponent {
    pub uuid: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub group: Option<String>,
    pub version: Option<String>,
    pub purl: Option<String>,
    pub cpe: Option<String>,
    /// Back-reference to the owning project's uuid
    pub project: Option<String>,
    pub latest_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindingVulnerability {
    pub uuid: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub vuln_id: String,
    pub source: Option<String>,
    pub title: Option<String>,
    pub severity: Option<String>,
    pub severity_rank: Option<i32>,
    pub cvss_v2_base_score: Option<f64>,
    pub cvss_v3_base_score: Option<f64>,
    pub epss_score: Option<f64>,
    pub epss_percentile: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub cwes: Vec<Cwe>,
    #[serde(deserialize_with = "null_as_default")]
    pub aliases: Vec<VulnerabilityAlias>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cwe {
    pub cwe_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VulnerabilityAlias {
    pub cve_id: Option<String>,
    pub ghsa_id: Option<String>,
    pub gsd_id: Option<String>,
    pub osv_id: Option<String>,
    pub snyk_id: Option<String>,
    pub sonatype_id: Option<String>,
    pub vuln_db_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindingAnalysis {
    pub state: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_suppressed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindingAttribution {
    pub uuid: Option<String>,
    pub analyzer_identity: Option<String>,
    /// Epoch milliseconds at which the analyzer attributed the finding
    pub attributed_on: Option<i64>,
    pub alternate_identifier: Option<String>,
    pub reference_url: Option<String>,
}

/// The API emits explicit `null`s for absent values; treat them as defaults.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
