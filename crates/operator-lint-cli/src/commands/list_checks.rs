//! List checks command implementation.

use anyhow::Result;
use operator_lint_core::SuiteRunner;
use std::path::Path;

/// Runs the list-checks command for the repository at `path`.
pub fn run(path: &Path, explicit_config: Option<&Path>, suite: Option<String>) -> Result<()> {
    let (_, config) = super::open(path, explicit_config)?;
    let suite = suite.unwrap_or_else(|| config.suite.clone());

    let runner = SuiteRunner::new(operator_lint_checks::resolver());
    let checks = super::discover(&runner, &suite)?;

    println!("Checks in {suite}:\n");
    println!("{:<12} {:<28} Enabled", "Category", "Check");
    println!("{}", "-".repeat(50));

    for (category, category_checks) in checks.iter() {
        if category_checks.is_empty() {
            println!("{category:<12} (none)");
        }
        for check in category_checks {
            let enabled = if config.is_check_enabled(check.name()) {
                "yes"
            } else {
                "no"
            };
            println!("{category:<12} {:<28} {enabled}", check.name());
        }
    }

    println!("\nDisable a check in operator-lint.toml, e.g.:");
    println!("  [checks.check_ci_config]");
    println!("  enabled = false");

    Ok(())
}
