//! Integration test: the built-in suite end-to-end over an on-disk repository.

use operator_lint_checks::{resolver, SUITE};
use operator_lint_core::{Repo, Severity, SuiteRunner};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().expect("fixture paths have parents"))
        .expect("fixture dir should be created");
    fs::write(path, "").expect("fixture file should be written");
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    let operators = tmp.path().join("operators");

    let etcd = operators.join("etcd");
    touch(&etcd.join("ci.yaml"));
    touch(&etcd.join("0.9.4/manifests/etcd.clusterserviceversion.yaml"));
    touch(&etcd.join("0.9.4/metadata/annotations.yaml"));
    touch(&etcd.join("1.0/manifests/etcd.clusterserviceversion.yaml"));

    fs::create_dir_all(operators.join("Bad_Name")).expect("operator dir");
    tmp
}

#[test]
fn reports_every_problem_in_order() {
    let tmp = fixture();
    let repo = Repo::load(tmp.path()).expect("fixture repo should load");

    let runner = SuiteRunner::new(resolver());
    let report = runner
        .run(repo.targets(), SUITE)
        .expect("built-in suite should load")
        .into_report()
        .expect("built-in checks should not fail");

    let rendered: Vec<String> = report.outcomes.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        [
            "failure: Operator(Bad_Name): Operator name `Bad_Name` is not a lowercase DNS-1123 label (max 63 chars)",
            "warning: Operator(Bad_Name): Operator has no ci.yaml",
            "warning: Operator(Bad_Name): Operator has no bundles",
            "failure: Bundle(etcd/1.0): Bundle is missing metadata/annotations.yaml",
            "warning: Bundle(etcd/1.0): Version `1.0` is not a semantic version (MAJOR.MINOR.PATCH)",
        ]
    );
    assert_eq!(report.count_by_severity(), (2, 3));
    assert_eq!(report.targets_checked, 5);
    assert!(report.has_outcomes_at(Severity::Failure));
}

#[test]
fn clean_repository_has_no_outcomes() {
    let tmp = TempDir::new().expect("tempdir");
    let etcd = tmp.path().join("operators/etcd");
    touch(&etcd.join("ci.yaml"));
    touch(&etcd.join("1.0.0/manifests/etcd.clusterserviceversion.yaml"));
    touch(&etcd.join("1.0.0/metadata/annotations.yaml"));

    let repo = Repo::load(tmp.path()).expect("fixture repo should load");
    let runner = SuiteRunner::new(resolver());
    let outcomes: Vec<_> = runner
        .run(repo.targets(), SUITE)
        .expect("built-in suite should load")
        .collect();
    assert!(outcomes.is_empty());
}

#[test]
fn unknown_suite_runs_nothing() {
    let tmp = fixture();
    let repo = Repo::load(tmp.path()).expect("fixture repo should load");

    let runner = SuiteRunner::new(resolver());
    let run = runner
        .run(repo.targets(), "other.checks")
        .expect("absent modules are not an error");
    assert_eq!(run.checks().check_count(), 0);
    assert_eq!(run.count(), 0);
}
