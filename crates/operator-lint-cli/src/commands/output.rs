//! Shared output formatting for check results.

use anyhow::Result;
use operator_lint_core::{Report, Severity};

use crate::OutputFormat;

/// Print a report in the specified format.
pub fn print(report: &Report<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &Report<'_>) {
    let (failures, warnings) = report.count_by_severity();

    for outcome in &report.outcomes {
        let severity_indicator = match outcome.severity {
            Severity::Failure => "\x1b[31mfailure\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
        };

        println!("{}", outcome.origin);
        println!("  {}: {}", severity_indicator, outcome.reason);
        println!();
    }

    let summary_color = if failures > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} failure(s), {} warning(s) in {} target(s)\x1b[0m",
        summary_color, failures, warnings, report.targets_checked
    );
}

fn print_json(report: &Report<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &Report<'_>) {
    for outcome in &report.outcomes {
        println!("{outcome}");
    }
}
