//! Check command implementation.

use anyhow::{Context, Result};
use operator_lint_core::{Report, Severity, SuiteRunner};
use std::path::Path;

use crate::OutputFormat;

/// Options for one `check` invocation.
pub struct CheckArgs<'a> {
    /// Repository root.
    pub path: &'a Path,
    /// `--config` override.
    pub config: Option<&'a Path>,
    /// Output format.
    pub format: OutputFormat,
    /// Suite override.
    pub suite: Option<String>,
    /// Severity threshold override.
    pub fail_on: Option<Severity>,
    /// Stop at the first outcome reaching the threshold.
    pub fail_fast: bool,
}

/// Runs the check command.
pub fn run(args: CheckArgs<'_>) -> Result<()> {
    let (repo, config) = super::open(args.path, args.config)?;
    let suite = args.suite.unwrap_or_else(|| config.suite.clone());
    let fail_on = args.fail_on.unwrap_or(config.fail_on);

    let runner = SuiteRunner::new(operator_lint_checks::resolver());
    let mut checks = super::discover(&runner, &suite)?;
    checks.retain(|_, check| {
        let enabled = config.is_check_enabled(check.name());
        if !enabled {
            tracing::debug!("Skipping disabled check: {}", check.name());
        }
        enabled
    });

    tracing::info!(
        "Running {} checks from {} on {}",
        checks.check_count(),
        suite,
        repo
    );

    let targets = repo.targets().filter(|target| {
        target
            .operator_name()
            .map_or(true, |name| !config.is_operator_excluded(name))
    });

    let mut run = runner.run_with(targets, checks);
    let mut report = Report::new();
    for outcome in &mut run {
        let outcome = outcome.context("Check execution failed")?;
        let stop = args.fail_fast && outcome.severity >= fail_on;
        report.outcomes.push(outcome);
        if stop {
            tracing::info!("Stopping at first {} (--fail-fast)", fail_on);
            break;
        }
    }
    report.targets_checked = run.targets_seen();

    let (failures, warnings) = report.count_by_severity();
    tracing::info!(
        "Checked {} targets: {} failure(s), {} warning(s)",
        report.targets_checked,
        failures,
        warnings
    );

    super::output::print(&report, args.format)?;

    if report.has_outcomes_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}
