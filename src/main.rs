//! dt-compare: reconcile vulnerability findings between two Dependency-Track
//! instances.

use anyhow::{Context, Result, bail};
use clap::Parser;
use dt_compare::{
    cli,
    config::{self, AppConfig, Validatable},
    pipeline::exit_codes,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dt-compare")]
#[command(version)]
#[command(about = "Compare vulnerability findings between two Dependency-Track instances", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Run completed (always, unless --fail-on-difference)
    1  Findings differed for at least one project
    3  A lookup or comparison failed, or the run could not start

EXAMPLES:
    # Compare a migrated instance against its predecessor
    dt-compare --url-a https://old.example --apikey-a $KEY_A \\
               --url-b https://new.example --apikey-b $KEY_B --out ./diffs

    # CI gate with a JSON summary
    dt-compare --config ci.yaml --summary --fail-on-difference")]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Base URL of Dependency-Track instance A (source)
    #[arg(long, env = "DT_COMPARE_URL_A")]
    url_a: Option<String>,

    /// API key for instance A
    #[arg(long, env = "DT_COMPARE_APIKEY_A", hide_env_values = true)]
    apikey_a: Option<String>,

    /// Base URL of Dependency-Track instance B (target)
    #[arg(long, env = "DT_COMPARE_URL_B")]
    url_b: Option<String>,

    /// API key for instance B
    #[arg(long, env = "DT_COMPARE_APIKEY_B", hide_env_values = true)]
    apikey_b: Option<String>,

    /// Maximum number of projects compared at once [default: 5]
    #[arg(long)]
    concurrency: Option<usize>,

    /// Directory for diff reports, created if missing [default: .]
    #[arg(long)]
    out: Option<PathBuf>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long)]
    timeout: Option<u64>,

    /// Page size for project and finding listings [default: 100]
    #[arg(long)]
    page_size: Option<u32>,

    /// Also write summary.json into the output directory
    #[arg(long)]
    summary: bool,

    /// Exit non-zero when findings differ or a comparison fails
    #[arg(long)]
    fail_on_difference: bool,

    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print an example configuration file and exit
    #[arg(long)]
    example_config: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Layer CLI and environment values over the file configuration.
    fn apply_to(self, config: &mut AppConfig) {
        if let Some(url) = self.url_a {
            config.instance_a.url = url;
        }
        if let Some(key) = self.apikey_a {
            config.instance_a.api_key = key;
        }
        if let Some(url) = self.url_b {
            config.instance_b.url = url;
        }
        if let Some(key) = self.apikey_b {
            config.instance_b.api_key = key;
        }
        if let Some(concurrency) = self.concurrency {
            config.run.concurrency = concurrency;
        }
        if let Some(timeout) = self.timeout {
            config.run.timeout_secs = timeout;
        }
        if let Some(page_size) = self.page_size {
            config.run.page_size = page_size;
        }
        if let Some(out) = self.out {
            config.output.dir = out;
        }
        if self.summary {
            config.output.summary = true;
        }
        if self.fail_on_difference {
            config.run.fail_on_difference = true;
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.example_config {
        print!("{}", config::generate_example_config());
        return;
    }

    match run(cli) {
        Ok(code) if code != exit_codes::SUCCESS => std::process::exit(code),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {e:?}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(args: Cli) -> Result<i32> {
    // Initialize logging
    let log_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let (mut app_config, loaded_from) =
        config::load_or_default(args.config.as_deref()).context("loading configuration")?;
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    args.apply_to(&mut app_config);

    let errors = app_config.validate();
    if !errors.is_empty() {
        for error in &errors {
            tracing::error!("invalid configuration: {}", error);
        }
        bail!("{} configuration errors", errors.len());
    }

    cli::run_compare(app_config)
}
