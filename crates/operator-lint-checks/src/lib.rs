//! # operator-lint-checks
//!
//! Built-in check suite for operator-lint.
//!
//! The suite lives under the namespace [`SUITE`] and contributes one module
//! per category:
//!
//! | Module | Check | Outcome |
//! |--------|-------|---------|
//! | `operator` | `check_operator_name` | failure if the name is not a DNS-1123 label |
//! | `operator` | `check_ci_config` | warning if `ci.yaml` is missing |
//! | `operator` | `check_bundles_present` | warning if the operator has no bundles |
//! | `bundle` | `check_manifests` | failure if `manifests/` is empty or missing |
//! | `bundle` | `check_annotations` | failure if `metadata/annotations.yaml` is missing |
//! | `bundle` | `check_version` | warning if the version is not semver |
//!
//! ## Usage
//!
//! ```ignore
//! use operator_lint_core::SuiteRunner;
//!
//! let runner = SuiteRunner::new(operator_lint_checks::resolver());
//! let run = runner.run(repo.targets(), operator_lint_checks::SUITE)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bundle;
pub mod operator;

use operator_lint_core::{check_failed, CheckError, Outcomes, StaticResolver, TargetKind};

/// Namespace of the built-in suite.
pub const SUITE: &str = "operator_repo.checks";

/// Returns a resolver with every built-in module registered.
#[must_use]
pub fn resolver() -> StaticResolver {
    StaticResolver::new()
        .module(format!("{SUITE}.operator"), operator::register)
        .module(format!("{SUITE}.bundle"), bundle::register)
}

fn wrong_target(expected: TargetKind, target: Target<'_>) -> Outcomes<'_> {
    check_failed(CheckError::UnexpectedTarget {
        expected,
        found: target.kind(),
    })
}

/// Re-export core types for convenience.
pub use operator_lint_core::{Outcome, Severity, Target};

#[cfg(test)]
mod tests {
    use super::*;
    use operator_lint_core::{discover, SUPPORTED_CATEGORIES};

    #[test]
    fn suite_covers_every_supported_category() {
        let checks = discover(&resolver(), SUITE, SUPPORTED_CATEGORIES).unwrap();
        for category in SUPPORTED_CATEGORIES {
            assert!(
                !checks.get(category.name).is_empty(),
                "no checks for {}",
                category.name
            );
        }
        assert_eq!(checks.check_count(), 6);
    }
}
