//! # operator-lint-core
//!
//! Core framework for validating operator repositories.
//!
//! This crate discovers checks contributed by plugin modules, dispatches
//! each target to the checks of its category, and streams the outcomes.
//! It includes:
//!
//! - [`Outcome`] and [`Severity`] for check results
//! - [`Classifier`] for first-match target categorization
//! - [`discover`] for collecting `check_*` functions from plugin modules
//! - [`SuiteRunner`] for lazily running a suite over a set of targets
//!
//! ## Example
//!
//! ```ignore
//! use operator_lint_core::{Repo, SuiteRunner};
//!
//! let repo = Repo::load("./community-operators")?;
//! let runner = SuiteRunner::new(operator_lint_checks::resolver());
//!
//! for outcome in runner.run(repo.targets(), "operator_repo.checks")? {
//!     println!("{}", outcome?);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod check;
mod config;
mod loader;
mod model;
mod runner;
mod types;

pub use category::{Category, Classifier, Recognizer, SUPPORTED_CATEGORIES};
pub use check::{
    check_failed, no_outcomes, outcomes, Check, CheckError, CheckFn, CheckModule, Outcomes,
    CHECK_PREFIX,
};
pub use config::{CheckConfig, Config, ConfigError, DEFAULT_SUITE};
pub use loader::{
    discover, CheckMap, DiscoveryError, ModuleLoader, ModuleResolver, ResolveError,
    StaticResolver,
};
pub use model::{
    compare_versions, Bundle, ModelError, Operator, Repo, Target, TargetKind, ANNOTATIONS_FILE,
    CI_CONFIG_FILE, MANIFESTS_DIR, OPERATORS_DIR,
};
pub use runner::{run_suite, RunError, SuiteRun, SuiteRunner};
pub use types::{Outcome, Report, Severity};
