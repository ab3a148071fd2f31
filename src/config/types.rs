//! Configuration types for a comparison run.

use super::defaults::{
    DEFAULT_CONCURRENCY, DEFAULT_MAX_RETRIES, DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_SIZE,
    DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration, loaded from a config file and overridden by CLI
/// arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Source instance (A)
    pub instance_a: InstanceConfig,
    /// Target instance (B)
    pub instance_b: InstanceConfig,
    pub run: RunConfig,
    pub output: OutputConfig,
}

/// Endpoint and credential of one Dependency-Track instance.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Base URL, e.g. `https://dtrack.example.com`
    pub url: String,
    /// API key sent as `X-Api-Key`
    #[serde(skip_serializing)]
    pub api_key: String,
}

impl InstanceConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for InstanceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceConfig")
            .field("url", &self.url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}

/// How the comparison runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum number of pairs compared at once
    pub concurrency: usize,
    pub page_size: u32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub max_retries: u8,
    /// Exit non-zero when a pair differs or fails
    pub fail_on_difference: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            fail_on_difference: false,
        }
    }
}

impl RunConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where reports go.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for diff reports, created if missing
    pub dir: PathBuf,
    /// Also write `summary.json` into `dir`
    pub summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            summary: false,
        }
    }
}
