//! End-to-end tests for the `operator-lint` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let etcd = tmp.path().join("operators/etcd");
    touch(&etcd.join("ci.yaml"));
    touch(&etcd.join("1.0/manifests/etcd.clusterserviceversion.yaml"));
    fs::create_dir_all(tmp.path().join("operators/Bad_Name")).unwrap();
    tmp
}

fn operator_lint(args: &[&str], global: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_operator-lint"))
        .args(args)
        .env("OPERATOR_LINT_CONFIG_DIR", global)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn check_reports_outcomes_and_fails() {
    let repo = fixture();
    let global = TempDir::new().unwrap();
    let path = repo.path().to_str().unwrap();

    let output = operator_lint(&["check", path, "--format", "compact"], global.path());

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        [
            "failure: Operator(Bad_Name): Operator name `Bad_Name` is not a lowercase DNS-1123 label (max 63 chars)",
            "warning: Operator(Bad_Name): Operator has no ci.yaml",
            "warning: Operator(Bad_Name): Operator has no bundles",
            "failure: Bundle(etcd/1.0): Bundle is missing metadata/annotations.yaml",
            "warning: Bundle(etcd/1.0): Version `1.0` is not a semantic version (MAJOR.MINOR.PATCH)",
        ]
    );
}

#[test]
fn fail_fast_stops_at_first_failure() {
    let repo = fixture();
    let global = TempDir::new().unwrap();
    let path = repo.path().to_str().unwrap();

    let output = operator_lint(
        &["check", path, "--format", "compact", "--fail-fast"],
        global.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_lines(&output).len(), 1);
}

#[test]
fn config_disables_checks_and_excludes_operators() {
    let repo = fixture();
    let global = TempDir::new().unwrap();
    fs::write(
        repo.path().join("operator-lint.toml"),
        r#"
exclude = ["Bad_*"]

[checks.check_annotations]
enabled = false
"#,
    )
    .unwrap();
    let path = repo.path().to_str().unwrap();

    let output = operator_lint(&["check", path, "--format", "compact"], global.path());

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_lines(&output),
        ["warning: Bundle(etcd/1.0): Version `1.0` is not a semantic version (MAJOR.MINOR.PATCH)"]
    );
}

#[test]
fn json_output_lists_outcomes() {
    let repo = fixture();
    let global = TempDir::new().unwrap();
    let path = repo.path().to_str().unwrap();

    let output = operator_lint(&["check", path, "--format", "json"], global.path());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(report["targets_checked"], 4);
    assert_eq!(report["outcomes"][0]["severity"], "failure");
    assert_eq!(report["outcomes"][0]["origin"], "Operator(Bad_Name)");
}

#[test]
fn missing_repository_is_an_error() {
    let empty = TempDir::new().unwrap();
    let global = TempDir::new().unwrap();

    let output = operator_lint(&["check", empty.path().to_str().unwrap()], global.path());

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load repository"));
}

#[test]
fn fail_on_flag_overrides_config_threshold() {
    let repo = fixture();
    let global = TempDir::new().unwrap();
    fs::write(
        repo.path().join("operator-lint.toml"),
        "exclude = [\"Bad_*\"]\n\n[checks.check_annotations]\nenabled = false\n",
    )
    .unwrap();
    let path = repo.path().to_str().unwrap();

    let output = operator_lint(
        &["check", path, "--format", "compact", "--fail-on", "warning"],
        global.path(),
    );
    assert_eq!(output.status.code(), Some(1));

    let output = operator_lint(&["check", path, "--fail-on", "error"], global.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn list_checks_reads_the_repository_config() {
    let repo = fixture();
    let global = TempDir::new().unwrap();
    fs::write(
        repo.path().join("operator-lint.toml"),
        "[checks.check_ci_config]\nenabled = false\n",
    )
    .unwrap();

    let output = operator_lint(
        &["list-checks", repo.path().to_str().unwrap()],
        global.path(),
    );
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    let row = |name: &str| {
        lines
            .iter()
            .find(|line| line.split_whitespace().nth(1) == Some(name))
            .unwrap_or_else(|| panic!("no row for {name}"))
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>()
    };

    for name in ["check_operator_name", "check_bundles_present"] {
        assert_eq!(row(name), ["operator", name, "yes"]);
    }
    for name in ["check_manifests", "check_annotations", "check_version"] {
        assert_eq!(row(name), ["bundle", name, "yes"]);
    }
    assert_eq!(row("check_ci_config"), ["operator", "check_ci_config", "no"]);
}

#[test]
fn init_writes_a_config_once() {
    let repo = fixture();
    let global = TempDir::new().unwrap();
    let path = repo.path().to_str().unwrap();

    let output = operator_lint(&["init", path], global.path());
    assert!(output.status.success());
    let written = fs::read_to_string(repo.path().join("operator-lint.toml")).unwrap();
    let config = operator_lint_core::Config::parse(&written).unwrap();
    assert_eq!(config.suite, operator_lint_core::DEFAULT_SUITE);

    let output = operator_lint(&["init", path], global.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));

    let output = operator_lint(&["init", path, "--force"], global.path());
    assert!(output.status.success());
}
