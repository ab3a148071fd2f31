//! Unified error types for dt-compare.
//!
//! Library code returns [`CompareError`]; the binary and CLI handlers wrap it
//! in `anyhow` at the boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dt-compare operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CompareError {
    /// Errors talking to a Dependency-Track instance
    #[error("Instance request failed: {context}: {source}")]
    Client {
        context: String,
        #[source]
        source: ClientErrorKind,
    },

    /// Errors while preparing two findings documents for diffing
    #[error("Comparison failed: {context}: {source}")]
    Compare {
        context: String,
        #[source]
        source: CompareErrorKind,
    },

    /// Errors while persisting reports
    #[error("Report generation failed: {context}: {source}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific client error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClientErrorKind {
    #[error("Invalid instance URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Specific comparison error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CompareErrorKind {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Canonicalization failed: {0}")]
    Canonicalization(String),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("Writing {path:?} failed: {message}")]
    Write { path: PathBuf, message: String },

    #[error("JSON serialization failed: {0}")]
    JsonSerialization(String),
}

/// Convenient Result type for dt-compare operations
pub type Result<T> = std::result::Result<T, CompareError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl CompareError {
    /// Create a client error with context
    pub fn client(context: impl Into<String>, source: ClientErrorKind) -> Self {
        Self::Client {
            context: context.into(),
            source,
        }
    }

    /// Create a comparison error with context
    pub fn compare(context: impl Into<String>, source: CompareErrorKind) -> Self {
        Self::Compare {
            context: context.into(),
            source,
        }
    }

    /// Create a report error with context
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP status carried by an API error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Client {
                source: ClientErrorKind::Api { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<serde_json::Error> for CompareError {
    fn from(err: serde_json::Error) -> Self {
        Self::compare(
            "JSON processing",
            CompareErrorKind::Serialization(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is prepended to any existing context, so nested calls read
/// outermost-first: `"fetching findings: decoding page 2: ..."`.
pub trait ErrorContext<T> {
    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CompareError>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: CompareError, new_ctx: &str) -> CompareError {
    match err {
        CompareError::Client { context, source } => CompareError::Client {
            context: chain_context(new_ctx, &context),
            source,
        },
        CompareError::Compare { context, source } => CompareError::Compare {
            context: chain_context(new_ctx, &context),
            source,
        },
        CompareError::Report { context, source } => CompareError::Report {
            context: chain_context(new_ctx, &context),
            source,
        },
        CompareError::Config(msg) => CompareError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Returns `"new: existing"`, or just `new` when there is no existing context.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
