//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_checks;
pub mod output;

use anyhow::{Context, Result};
use operator_lint_core::{CheckMap, Config, Repo, StaticResolver, SuiteRunner};
use std::path::Path;

use crate::config_locator::{ConfigLocator, ConfigSource};

/// Loads the repository at `path` and the configuration that applies to it.
pub fn open(path: &Path, explicit_config: Option<&Path>) -> Result<(Repo, Config)> {
    let repo = Repo::load(path)
        .with_context(|| format!("Failed to load repository at {}", path.display()))?;

    let source = ConfigLocator::from_env().locate(&repo, explicit_config);
    let config = match source.path() {
        Some(config_path) => {
            if matches!(source, ConfigSource::User(_)) {
                tracing::info!("Using user config: {}", config_path.display());
            }
            Config::from_file(config_path)
                .with_context(|| format!("Failed to load config: {}", config_path.display()))?
        }
        None => Config::default(),
    };

    Ok((repo, config))
}

/// Discovers a suite with the built-in resolver, rendering failures as diagnostics.
pub fn discover(runner: &SuiteRunner<StaticResolver>, suite: &str) -> Result<CheckMap> {
    runner
        .discover(suite)
        .map_err(|e| anyhow::anyhow!("{:?}", miette::Report::new(e)))
}
