//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config_locator::REPO_CONFIG_FILES;

const DEFAULT_CONFIG: &str = r#"# operator-lint configuration

# Suite namespace to run
suite = "operator_repo.checks"

# Exit non-zero when an outcome reaches this severity: "warning" or "failure"
fail_on = "failure"

# Operator names (glob patterns) to leave out
exclude = []

# Check configurations
# Each discovered check can be disabled by name

[checks.check_operator_name]
enabled = true

# [checks.check_ci_config]
# enabled = false
"#;

/// Writes a starter config into the repository root `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(REPO_CONFIG_FILES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to configure checks", REPO_CONFIG_FILES[0]);
    println!("  2. Run: operator-lint check {}", dir.display());

    Ok(())
}
