//! Configuration types for operator-lint.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Suite namespace checked when none is configured.
pub const DEFAULT_SUITE: &str = "operator_repo.checks";

/// Top-level configuration for operator-lint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Suite namespace to run (default: `operator_repo.checks`).
    #[serde(default = "default_suite")]
    pub suite: String,

    /// Outcomes at or above this severity fail the run (default: failure).
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,

    /// Glob patterns of operator names to leave out.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Per-check configurations, keyed by check name.
    #[serde(default)]
    pub checks: HashMap<String, CheckConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suite: default_suite(),
            fail_on: default_fail_on(),
            exclude: Vec::new(),
            checks: HashMap::new(),
        }
    }
}

fn default_suite() -> String {
    DEFAULT_SUITE.to_string()
}

fn default_fail_on() -> Severity {
    Severity::Failure
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or an exclude pattern is not a valid glob.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        for pattern in &config.exclude {
            glob::Pattern::new(pattern).map_err(|e| ConfigError::Pattern {
                pattern: pattern.clone(),
                source: e,
            })?;
        }
        Ok(config)
    }

    /// Checks if a check is enabled.
    #[must_use]
    pub fn is_check_enabled(&self, check_name: &str) -> bool {
        self.checks
            .get(check_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Checks if an operator is excluded by name.
    #[must_use]
    pub fn is_operator_excluded(&self, operator_name: &str) -> bool {
        self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern).is_ok_and(|p| p.matches(operator_name))
        })
    }
}

/// Per-check configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Whether this check is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// An exclude entry is not a valid glob.
    #[error("Invalid exclude pattern `{pattern}`: {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Glob error.
        source: glob::PatternError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.suite, DEFAULT_SUITE);
        assert_eq!(config.fail_on, Severity::Failure);
        assert!(config.checks.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
suite = "custom.checks"
fail_on = "warning"
exclude = ["legacy-*"]

[checks.check_ci_config]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.suite, "custom.checks");
        assert_eq!(config.fail_on, Severity::Warning);
        assert!(!config.is_check_enabled("check_ci_config"));
        assert!(config.is_check_enabled("check_manifests"));
        assert!(config.is_operator_excluded("legacy-etcd"));
        assert!(!config.is_operator_excluded("etcd"));
    }

    #[test]
    fn test_parse_rejects_unknown_severity() {
        let err = Config::parse("fail_on = \"error\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_parse_rejects_invalid_glob() {
        let err = Config::parse("exclude = [\"[\"]").unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { .. }));
    }
}
