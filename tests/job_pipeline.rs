// tests/job_pipeline.rs
use std::fs;
use std::path::Path;

use smellfix_core::analyzer::{self, rules, AnalyzerFinding};
use smellfix_core::config::Config;
use smellfix_core::history::Grouping;
use smellfix_core::job::{run_job, ProjectJob};
use smellfix_core::reporting;
use smellfix_core::tree::{JsonTreeStore, Modifier, ReadOnlyStore, SyntaxTree, UnitBuilder};
use tempfile::TempDir;

const UTIL: &str = "src/main/java/pkg/Util.java";

fn util_tree() -> SyntaxTree {
    let mut unit = UnitBuilder::new(UTIL, "pkg.Util").unwrap();
    let a = unit
        .method("a", &[Modifier::Static, Modifier::Final], &[])
        .unwrap();
    unit.at_line(a, 4).unwrap();
    let b = unit
        .method("b", &[Modifier::Static, Modifier::Final], &[])
        .unwrap();
    unit.at_line(b, 9).unwrap();
    unit.build()
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let pkg = dir.path().join("src/main/java/pkg");
    fs::create_dir_all(&pkg).unwrap();
    fs::write(
        pkg.join("Util.tree.json"),
        serde_json::to_string(&util_tree()).unwrap(),
    )
    .unwrap();
    // build output must not be picked up as a source root
    fs::create_dir_all(dir.path().join("target/src/main/java")).unwrap();
    dir
}

fn snapshot(project: &Path) -> String {
    fs::read_to_string(project.join("src/main/java/pkg/Util.tree.json")).unwrap()
}

fn finding(line: u32) -> AnalyzerFinding {
    AnalyzerFinding::new(rules::FINAL_STATIC_METHOD, UTIL, "final on static method", "static final")
        .at_line(line)
}

#[test]
fn fix_saves_repaired_trees() {
    let project = project();
    let before = snapshot(project.path());

    let report = run_job(&ProjectJob::new(project.path()), &Config::default(), &JsonTreeStore);

    assert_eq!(report.roots, vec![project.path().join("src/main/java")]);
    assert_eq!(report.outcome.applied(), 2);
    assert_ne!(snapshot(project.path()), before);

    let again = run_job(&ProjectJob::new(project.path()), &Config::default(), &JsonTreeStore);
    assert_eq!(again.outcome.applied(), 0);
}

#[test]
fn dry_run_leaves_snapshots_alone() {
    let project = project();
    let before = snapshot(project.path());

    let report = run_job(
        &ProjectJob::new(project.path()),
        &Config::default(),
        &ReadOnlyStore(JsonTreeStore),
    );

    assert_eq!(report.outcome.applied(), 2);
    assert_eq!(snapshot(project.path()), before);
}

#[test]
fn reported_findings_are_not_repaired_again() {
    let project = project();
    let findings = vec![finding(4), finding(9)];
    let job = ProjectJob::new(project.path()).with_findings(vec![findings[0].clone()]);

    let first = run_job(&job, &Config::default(), &ReadOnlyStore(JsonTreeStore));
    let sets = first.change_sets(Grouping::Single, 10);
    let changelog = reporting::print_change_set(&sets[0]).unwrap();

    let seen = reporting::extract_fingerprints(&changelog);
    let fresh = analyzer::filter_new_findings(findings, &seen);
    assert_eq!(fresh, vec![finding(9)]);

    let second = run_job(
        &ProjectJob::new(project.path()).with_findings(fresh),
        &Config::default(),
        &ReadOnlyStore(JsonTreeStore),
    );
    let changes = second.outcome.changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].summary(), "Removed final modifier from static method b");
}

#[test]
fn changelog_lists_category_and_changes() {
    let project = project();
    let job = ProjectJob::new(project.path()).with_findings(vec![finding(4)]);

    let report = run_job(&job, &Config::default(), &ReadOnlyStore(JsonTreeStore));
    let sets = report.change_sets(Grouping::PerType, 10);
    assert_eq!(sets.len(), 1);
    assert_eq!(
        sets[0].affected_type.map(|t| t.qualified_name.as_str()),
        Some("pkg.Util")
    );

    let text = reporting::print_change_set(&sets[0]).unwrap();
    assert!(text.starts_with("# Repairing Code Style Issues\n## FinalStaticMethod\n"));
    assert!(text.contains("## Changes:\n* Removed final modifier from static method a\n"));
    assert!(text.contains(&format!("<!-- fingerprint:{} -->", finding(4).fingerprint())));
}

#[test]
fn findings_file_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("findings.json");
    fs::write(&path, serde_json::to_string(&vec![finding(4)]).unwrap()).unwrap();

    let loaded = analyzer::load_findings(&path).unwrap();

    assert_eq!(loaded, vec![finding(4)]);
}
