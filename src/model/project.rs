//! Projects and the identity used to pair them across instances.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A project tracked by a Dependency-Track instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    /// Instance-local identifier, never compared across instances
    pub uuid: String,
    pub name: String,
    pub version: Option<String>,
    pub group: Option<String>,
    pub classifier: Option<String>,
    pub active: Option<bool>,
    pub last_bom_import: Option<i64>,
}

impl Project {
    /// Create a project with the given identity and instance-local uuid.
    pub fn new(uuid: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            version: Some(version.into()),
            ..Self::default()
        }
    }

    /// Version string, empty when the project has none.
    #[must_use]
    pub fn version_str(&self) -> &str {
        self.version.as_deref().unwrap_or_default()
    }

    /// The (name, version) identity of this project.
    #[must_use]
    pub fn identity(&self) -> ProjectIdentity {
        ProjectIdentity {
            name: self.name.clone(),
            version: self.version_str().to_string(),
        }
    }
}

/// (name, version) pair identifying a project across instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectIdentity {
    pub name: String,
    pub version: String,
}

impl ProjectIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

/// A source project matched with its counterpart in the target instance.
///
/// Only [`crate::matching`] constructs pairs, and only when both sides share
/// the same [`ProjectIdentity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonPair {
    source: Project,
    target: Project,
}

impl ComparisonPair {
    /// Pair two projects, returning `None` if their identities differ.
    #[must_use]
    pub fn new(source: Project, target: Project) -> Option<Self> {
        (source.name == target.name && source.version_str() == target.version_str())
            .then_some(Self { source, target })
    }

    #[must_use]
    pub const fn source(&self) -> &Project {
        &self.source
    }

    #[must_use]
    pub const fn target(&self) -> &Project {
        &self.target
    }

    /// Identity shared by both sides of the pair.
    #[must_use]
    pub fn identity(&self) -> ProjectIdentity {
        self.source.identity()
    }
}
