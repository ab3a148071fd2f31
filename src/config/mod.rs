//! Configuration for dt-compare.
//!
//! Values come from, in increasing precedence: built-in defaults, a YAML
//! config file, environment variables, and CLI arguments.
//!
//! # Configuration File
//!
//! Place a `.dt-compare.yaml` file in the working directory or
//! `~/.config/dt-compare/`:
//!
//! ```yaml
//! instance_a:
//!   url: https://dtrack-a.example.com
//! instance_b:
//!   url: https://dtrack-b.example.com
//! run:
//!   concurrency: 8
//! output:
//!   dir: ./reports
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_CONCURRENCY, DEFAULT_MAX_RETRIES, DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_SIZE,
    DEFAULT_TIMEOUT_SECS,
};
pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, load_config_file,
    load_or_default,
};
pub use types::{AppConfig, InstanceConfig, OutputConfig, RunConfig};
pub use validation::{ConfigError, Validatable};
