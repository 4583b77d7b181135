//! Finds the configuration that applies to a repository.
//!
//! Candidates, first existing file wins:
//!
//! 1. the `--config` path, taken as given
//! 2. [`REPO_CONFIG_FILES`] at the repository root
//! 3. `config.toml` in the user config directory
//!
//! When none exists the built-in defaults apply.

use operator_lint_core::Repo;
use std::path::{Path, PathBuf};

/// Config file names looked up at a repository root, in order.
pub const REPO_CONFIG_FILES: [&str; 2] = ["operator-lint.toml", ".operator-lint.toml"];

/// Overrides the user config directory.
const CONFIG_DIR_ENV: &str = "OPERATOR_LINT_CONFIG_DIR";

const USER_CONFIG_FILE: &str = "config.toml";

/// Where a run's configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`.
    Explicit(PathBuf),
    /// Checked into the repository.
    Repository(PathBuf),
    /// The user's own defaults.
    User(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The config file to read, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Repository(path) | Self::User(path) => Some(path),
            Self::Default => None,
        }
    }
}

/// Looks up config files for repositories.
#[derive(Debug, Clone, Default)]
pub struct ConfigLocator {
    user_dir: Option<PathBuf>,
}

impl ConfigLocator {
    /// Uses `$OPERATOR_LINT_CONFIG_DIR`, else `~/.operator-lint`.
    #[must_use]
    pub fn from_env() -> Self {
        let user_dir = std::env::var_os(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| home::home_dir().map(|home| home.join(".operator-lint")));
        Self { user_dir }
    }

    /// Uses the given user config directory, or none.
    #[must_use]
    pub fn with_user_dir(user_dir: Option<PathBuf>) -> Self {
        Self { user_dir }
    }

    /// Picks the configuration for `repo`.
    #[must_use]
    pub fn locate(&self, repo: &Repo, explicit: Option<&Path>) -> ConfigSource {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        let in_repo = REPO_CONFIG_FILES
            .iter()
            .map(|name| ConfigSource::Repository(repo.root.join(name)));
        let for_user = self
            .user_dir
            .iter()
            .map(|dir| ConfigSource::User(dir.join(USER_CONFIG_FILE)));

        match in_repo
            .chain(for_user)
            .find(|source| source.path().is_some_and(Path::is_file))
        {
            Some(source) => {
                tracing::debug!("Using config {:?} for {}", source, repo);
                source
            }
            None => ConfigSource::Default,
        }
    }
}
