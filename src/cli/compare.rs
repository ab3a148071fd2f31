//! Compare command handler.
//!
//! Lists the source instance's projects, pairs them with the target instance,
//! and runs the per-pair comparison on the worker pool.

use crate::client::{DtrackClient, DtrackClientConfig, Instance, collect_projects};
use crate::compare::FindingsComparator;
use crate::config::{AppConfig, InstanceConfig};
use crate::matching::match_projects;
use crate::pipeline::{ComparisonPool, RunSummary};
use crate::reports::{DiffReportWriter, SUMMARY_FILE_NAME, write_summary};
use anyhow::{Context, Result};
use chrono::Utc;

/// Run a full comparison between the two configured instances, returning
/// the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_compare(config: AppConfig) -> Result<i32> {
    let source = build_client(&config, &config.instance_a).context("instance A")?;
    let target = build_client(&config, &config.instance_b).context("instance B")?;

    let summary = compare_instances(&source, &target, &config)?;
    summary.log_summary();

    Ok(summary.exit_code(config.run.fail_on_difference))
}

fn build_client(config: &AppConfig, instance: &InstanceConfig) -> Result<DtrackClient> {
    let client = DtrackClient::new(DtrackClientConfig {
        base_url: instance.url.clone(),
        api_key: instance.api_key.clone(),
        timeout: config.run.timeout(),
        max_retries: config.run.max_retries,
    })
    .with_context(|| format!("creating client for {}", instance.url))?;
    Ok(client)
}

/// Compare every project of `source` with its counterpart in `target`.
///
/// Only listing the source projects is fatal. Lookup, fetch and report
/// failures are recorded per project in the returned summary.
pub fn compare_instances(
    source: &dyn Instance,
    target: &dyn Instance,
    config: &AppConfig,
) -> Result<RunSummary> {
    let started_at = Utc::now();
    let page_size = config.run.page_size;

    let projects = collect_projects(source, page_size)
        .with_context(|| format!("listing projects in {}", source.base_url()))?;
    let projects_in_source = projects.len();
    tracing::info!("found {} projects in {}", projects_in_source, source.base_url());

    let mut matching = match_projects(target, projects);
    let pairs = std::mem::take(&mut matching.pairs);
    tracing::info!(
        "matched {} projects in {} ({} not found, {} lookup failures)",
        pairs.len(),
        target.base_url(),
        matching.unmatched.len(),
        matching.failures.len()
    );

    let out_dir = &config.output.dir;
    let results = if pairs.is_empty() {
        tracing::info!("no projects to compare, nothing to do");
        Vec::new()
    } else {
        ensure_out_dir(out_dir)?;
        let comparator = FindingsComparator::new(source, target, DiffReportWriter::new(out_dir))
            .with_page_size(page_size);
        ComparisonPool::new(&comparator, config.run.concurrency).run(pairs)
    };

    let summary = RunSummary::new(
        started_at,
        source.base_url(),
        target.base_url(),
        projects_in_source,
        matching,
        results,
    );

    if config.output.summary {
        ensure_out_dir(out_dir)?;
        write_summary(&out_dir.join(SUMMARY_FILE_NAME), &summary)?;
    }

    Ok(summary)
}

fn ensure_out_dir(dir: &std::path::Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))
}
