//! Pipeline and CLI integration tests.
//!
//! These tests run the full list → match → compare → report pipeline
//! against in-memory instances.

use dt_compare::cli::compare_instances;
use dt_compare::client::MemoryInstance;
use dt_compare::compare::{ComparisonOutcome, FailureStage};
use dt_compare::config::AppConfig;
use dt_compare::model::{Finding, Project, ProjectIdentity};
use dt_compare::pipeline::{RunSummary, exit_codes};
use dt_compare::reports::SUMMARY_FILE_NAME;
use std::path::Path;

// ============================================================================
// Test Fixtures
// ============================================================================

/// A finding as one instance would report it; `local` seeds every
/// instance-local field so two instances never agree on them.
fn finding(component: &str, vuln: &str, local: &str) -> Finding {
    let mut f = Finding::new(component, vuln);
    f.component.uuid = Some(format!("{local}-component"));
    f.component.project = Some(format!("{local}-project"));
    f.vulnerability.uuid = Some(format!("{local}-vuln"));
    f.vulnerability.severity = Some("HIGH".to_string());
    f.attribution.uuid = Some(format!("{local}-attribution"));
    f.attribution.attributed_on = Some(local.len() as i64 * 1000);
    f.matrix = format!("{local}:matrix");
    f
}

fn config(out: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.output.dir = out.to_path_buf();
    config.run.concurrency = 3;
    config
}

fn outcome_for<'a>(summary: &'a RunSummary, name: &str, version: &str) -> &'a ComparisonOutcome {
    let identity = ProjectIdentity::new(name, version);
    &summary
        .results
        .iter()
        .find(|r| r.project == identity)
        .unwrap_or_else(|| panic!("no result for {identity}"))
        .outcome
}

fn html_files(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".html"))
        .collect();
    names.sort();
    names
}

// ============================================================================
// Per-project scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn equal_findings_produce_no_report() {
        let dir = tempfile::tempdir().unwrap();
        let a = MemoryInstance::new("memory://a").with_project(
            Project::new("a-1", "app", "1.0"),
            vec![finding("libX", "CVE-2020-1", "a")],
        );
        let b = MemoryInstance::new("memory://b").with_project(
            Project::new("b-1", "app", "1.0"),
            vec![finding("libX", "CVE-2020-1", "bb")],
        );

        let summary = compare_instances(&a, &b, &config(dir.path())).unwrap();

        assert!(outcome_for(&summary, "app", "1.0").is_equal());
        assert!(html_files(dir.path()).is_empty());
        assert_eq!(summary.counts.equal, 1);
    }

    #[test]
    fn differing_findings_produce_report() {
        let dir = tempfile::tempdir().unwrap();
        let a = MemoryInstance::new("memory://a").with_project(
            Project::new("a-1", "app", "1.0"),
            vec![finding("libX", "CVE-2020-1", "a")],
        );
        let b = MemoryInstance::new("memory://b").with_project(
            Project::new("b-1", "app", "1.0"),
            vec![
                finding("libX", "CVE-2020-1", "b"),
                finding("libY", "CVE-2021-2", "b"),
            ],
        );

        let summary = compare_instances(&a, &b, &config(dir.path())).unwrap();

        match outcome_for(&summary, "app", "1.0") {
            ComparisonOutcome::Different {
                report,
                lines_added,
                ..
            } => {
                assert_eq!(report, &dir.path().join("app_1.0.html"));
                assert!(*lines_added > 0);
                let html = std::fs::read_to_string(report).unwrap();
                assert!(html.starts_with("<pre>") && html.ends_with("</pre>"));
                assert!(html.contains("CVE-2021-2"));
            }
            other => panic!("expected Different, got {other:?}"),
        }
        assert_eq!(html_files(dir.path()), vec!["app_1.0.html"]);
    }

    #[test]
    fn unmatched_project_is_not_compared() {
        let dir = tempfile::tempdir().unwrap();
        let a = MemoryInstance::new("memory://a").with_project(
            Project::new("a-1", "tool", "2.0"),
            vec![finding("libX", "CVE-2020-1", "a")],
        );
        let b = MemoryInstance::new("memory://b")
            .with_project(Project::new("b-1", "tool", "2.1"), Vec::new());

        let summary = compare_instances(&a, &b, &config(dir.path())).unwrap();

        assert!(summary.results.is_empty());
        assert_eq!(summary.unmatched, vec![ProjectIdentity::new("tool", "2.0")]);
        assert!(summary.match_failures.is_empty());
        assert_eq!(a.finding_requests(), 0);
        assert!(html_files(dir.path()).is_empty());
        assert_eq!(summary.exit_code(true), exit_codes::SUCCESS);
    }

    #[test]
    fn slash_in_name_is_replaced_in_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let a = MemoryInstance::new("memory://a").with_project(
            Project::new("a-1", "group/app", "3.0"),
            vec![finding("libX", "CVE-2020-1", "a")],
        );
        let b = MemoryInstance::new("memory://b")
            .with_project(Project::new("b-1", "group/app", "3.0"), Vec::new());

        let summary = compare_instances(&a, &b, &config(dir.path())).unwrap();

        assert!(outcome_for(&summary, "group/app", "3.0").is_different());
        assert_eq!(html_files(dir.path()), vec!["group-app_3.0.html"]);
    }

    #[test]
    fn report_content_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let a = MemoryInstance::new("memory://a").with_project(
            Project::new("a-1", "app", "1.0"),
            vec![finding("<script>alert(1)</script>", "CVE-2020-1", "a")],
        );
        let b = MemoryInstance::new("memory://b")
            .with_project(Project::new("b-1", "app", "1.0"), Vec::new());

        compare_instances(&a, &b, &config(dir.path())).unwrap();

        let html = std::fs::read_to_string(dir.path().join("app_1.0.html")).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}

// ============================================================================
// Comparison semantics
// ============================================================================

mod semantics {
    use super::*;

    #[test]
    fn order_of_findings_does_not_matter() {
        let dir = tempfile::tempdir().unwrap();
        let a = MemoryInstance::new("memory://a").with_project(
            Project::new("a-1", "app", "1.0"),
            vec![
                finding("libZ", "CVE-2022-3", "a"),
                finding("libX", "CVE-2020-1", "a"),
                finding("libX", "CVE-2019-9", "a"),
            ],
        );
        let b = MemoryInstance::new("memory://b").with_project(
            Project::new("b-1", "app", "1.0"),
            vec![
                finding("libX", "CVE-2019-9", "b"),
                finding("libZ", "CVE-2022-3", "b"),
                finding("libX", "CVE-2020-1", "b"),
            ],
        );

        let summary = compare_instances(&a, &b, &config(dir.path())).unwrap();
        assert!(outcome_for(&summary, "app", "1.0").is_equal());
    }

    #[test]
    fn analysis_state_difference_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let mut triaged = finding("libX", "CVE-2020-1", "b");
        triaged.analysis.state = Some("FALSE_POSITIVE".to_string());

        let a = MemoryInstance::new("memory://a").with_project(
            Project::new("a-1", "app", "1.0"),
            vec![finding("libX", "CVE-2020-1", "a")],
        );
        let b = MemoryInstance::new("memory://b")
            .with_project(Project::new("b-1", "app", "1.0"), vec![triaged]);

        let summary = compare_instances(&a, &b, &config(dir.path())).unwrap();
        assert!(outcome_for(&summary, "app", "1.0").is_different());
    }

    #[test]
    fn suppressed_findings_are_compared() {
        let dir = tempfile::tempdir().unwrap();
        let mut suppressed = finding("libX", "CVE-2020-1", "a");
        suppressed.analysis.is_suppressed = true;

        let a = MemoryInstance::new("memory://a")
            .with_project(Project::new("a-1", "app", "1.0"), vec![suppressed]);
        let b = MemoryInstance::new("memory://b")
            .with_project(Project::new("b-1", "app", "1.0"), Vec::new());

        let summary = compare_instances(&a, &b, &config(dir.path())).unwrap();
        assert!(outcome_for(&summary, "app", "1.0").is_different());
    }

    #[test]
    fn lookup_failure_differs_from_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let a = MemoryInstance::new("memory://a")
            .with_project(Project::new("a-1", "broken", "1.0"), Vec::new())
            .with_project(Project::new("a-2", "absent", "1.0"), Vec::new())
            .with_project(Project::new("a-3", "app", "1.0"), Vec::new());
        let b = MemoryInstance::new("memory://b")
            .with_project(Project::new("b-3", "app", "1.0"), Vec::new())
            .with_failing_lookup("broken", "1.0");

        let summary = compare_instances(&a, &b, &config(dir.path())).unwrap();

        assert_eq!(summary.unmatched, vec![ProjectIdentity::new("absent", "1.0")]);
        assert_eq!(summary.match_failures.len(), 1);
        assert_eq!(
            summary.match_failures[0].project,
            ProjectIdentity::new("broken", "1.0")
        );
        assert!(summary.match_failures[0].reason.contains("injected failure"));
        assert!(outcome_for(&summary, "app", "1.0").is_equal());
        assert_eq!(summary.exit_code(false), exit_codes::SUCCESS);
        assert_eq!(summary.exit_code(true), exit_codes::ERROR);
    }

    #[test]
    fn fetch_failure_is_isolated_to_its_pair() {
        let dir = tempfile::tempdir().unwrap();
        let a = MemoryInstance::new("memory://a")
            .with_project(Project::new("a-1", "app", "1.0"), Vec::new())
            .with_project(Project::new("a-2", "lib", "2.0"), Vec::new())
            .with_failing_findings("a-1");
        let b = MemoryInstance::new("memory://b")
            .with_project(Project::new("b-1", "app", "1.0"), Vec::new())
            .with_project(Project::new("b-2", "lib", "2.0"), Vec::new());

        let summary = compare_instances(&a, &b, &config(dir.path())).unwrap();

        match outcome_for(&summary, "app", "1.0") {
            ComparisonOutcome::Failed { stage, reason } => {
                assert_eq!(*stage, FailureStage::FetchSource);
                assert!(reason.contains("status 500"), "{reason}");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(outcome_for(&summary, "lib", "2.0").is_equal());
    }
}

// ============================================================================
// Run-level behavior
// ============================================================================

mod run {
    use super::*;

    #[test]
    fn every_pair_yields_one_result() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = MemoryInstance::new("memory://a");
        let mut b = MemoryInstance::new("memory://b");
        for i in 0..40 {
            let name = format!("app-{i}");
            let mut target_findings = vec![finding("libX", "CVE-2020-1", "b")];
            if i % 4 == 0 {
                target_findings.push(finding("libY", "CVE-2021-2", "b"));
            }
            a = a.with_project(
                Project::new(format!("a-{i}"), &name, "1.0"),
                vec![finding("libX", "CVE-2020-1", "a")],
            );
            b = b.with_project(Project::new(format!("b-{i}"), &name, "1.0"), target_findings);
        }

        let mut config = config(dir.path());
        // Small pages force paging through both lists.
        config.run.page_size = 7;
        let summary = compare_instances(&a, &b, &config).unwrap();

        assert_eq!(summary.projects_in_source, 40);
        assert_eq!(summary.results.len(), 40);
        assert_eq!(summary.counts.different, 10);
        assert_eq!(summary.counts.equal, 30);
        assert_eq!(html_files(dir.path()).len(), 10);
        assert_eq!(summary.exit_code(true), exit_codes::DIFFERENCES_FOUND);
    }

    #[test]
    fn output_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("reports");
        let a = MemoryInstance::new("memory://a").with_project(
            Project::new("a-1", "app", "1.0"),
            vec![finding("libX", "CVE-2020-1", "a")],
        );
        let b = MemoryInstance::new("memory://b")
            .with_project(Project::new("b-1", "app", "1.0"), Vec::new());

        compare_instances(&a, &b, &config(&out)).unwrap();
        assert_eq!(html_files(&out), vec!["app_1.0.html"]);
    }

    #[test]
    fn summary_file_is_written_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let a = MemoryInstance::new("memory://a")
            .with_project(Project::new("a-1", "app", "1.0"), Vec::new())
            .with_project(Project::new("a-2", "tool", "2.0"), Vec::new());
        let b = MemoryInstance::new("memory://b")
            .with_project(Project::new("b-1", "app", "1.0"), Vec::new());

        let mut config = config(dir.path());
        config.output.summary = true;
        compare_instances(&a, &b, &config).unwrap();

        let content = std::fs::read_to_string(dir.path().join(SUMMARY_FILE_NAME)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["projects_in_source"], 2);
        assert_eq!(value["counts"]["equal"], 1);
        assert_eq!(value["unmatched"][0]["name"], "tool");
        assert_eq!(value["results"][0]["outcome"], "equal");
        assert_eq!(value["source_url"], "memory://a");
    }

    #[test]
    fn no_summary_without_request() {
        let dir = tempfile::tempdir().unwrap();
        let a = MemoryInstance::new("memory://a")
            .with_project(Project::new("a-1", "app", "1.0"), Vec::new());
        let b = MemoryInstance::new("memory://b")
            .with_project(Project::new("b-1", "app", "1.0"), Vec::new());

        compare_instances(&a, &b, &config(dir.path())).unwrap();
        assert!(!dir.path().join(SUMMARY_FILE_NAME).exists());
    }
}
