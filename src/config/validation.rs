//! Configuration validation.

use super::types::{AppConfig, InstanceConfig, OutputConfig, RunConfig};
use thiserror::Error;

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(prefixed("instance_a", self.instance_a.validate()));
        errors.extend(prefixed("instance_b", self.instance_b.validate()));
        errors.extend(self.run.validate());
        errors.extend(self.output.validate());
        errors
    }
}

fn prefixed(prefix: &str, errors: Vec<ConfigError>) -> impl Iterator<Item = ConfigError> + '_ {
    errors.into_iter().map(move |mut e| {
        e.field = format!("{prefix}.{}", e.field);
        e
    })
}

impl Validatable for InstanceConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.url.trim().is_empty() {
            errors.push(ConfigError::new("url", "URL is required"));
        } else if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            errors.push(ConfigError::new(
                "url",
                format!("URL must start with http:// or https://, got '{}'", self.url),
            ));
        }
        if self.api_key.is_empty() {
            errors.push(ConfigError::new("api_key", "API key is required"));
        }
        errors
    }
}

impl Validatable for RunConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.concurrency == 0 {
            errors.push(ConfigError::new("run.concurrency", "must be at least 1"));
        }
        if self.page_size == 0 {
            errors.push(ConfigError::new("run.page_size", "must be at least 1"));
        }
        if self.timeout_secs == 0 {
            errors.push(ConfigError::new("run.timeout_secs", "must be at least 1 second"));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.dir.as_os_str().is_empty() {
            errors.push(ConfigError::new("output.dir", "output directory is required"));
        } else if self.dir.is_file() {
            errors.push(ConfigError::new(
                "output.dir",
                format!("{} is a file, not a directory", self.dir.display()),
            ));
        }
        errors
    }
}
