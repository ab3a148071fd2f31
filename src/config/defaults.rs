//! Default values shared by the CLI and config file loading.

/// Number of pairs compared at once.
pub const DEFAULT_CONCURRENCY: usize = crate::pipeline::DEFAULT_CONCURRENCY;

/// Page size used when walking project and finding lists.
pub const DEFAULT_PAGE_SIZE: u32 = crate::client::DEFAULT_PAGE_SIZE;

/// Per-request HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Retries for transport errors and 5xx responses.
pub const DEFAULT_MAX_RETRIES: u8 = 2;

/// Output directory when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = ".";
