//! Check discovery.
//!
//! A suite is a dotted namespace such as `operator_repo.checks`. For every
//! declared category the loader resolves `<suite>.<category>` through a
//! [`ModuleResolver`] and collects the module's `check_*` members.
//!
//! Resolution outcomes:
//!
//! - the resolver reports [`ResolveError::NotFound`] for exactly the
//!   requested path: the category has no checks;
//! - any other error, including `NotFound` for some *other* path the
//!   module depends on: discovery fails.

use crate::category::Category;
use crate::check::{Check, CheckModule};
use std::collections::HashMap;
use tracing::debug;

/// Errors a resolver reports for a module path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No module is registered under this path.
    #[error("no module named `{path}`")]
    NotFound {
        /// Path that was looked up.
        path: String,
    },

    /// The module exists but needs something that is not available.
    #[error("module `{path}` requires `{dependency}`, which is not available")]
    MissingDependency {
        /// Module being loaded.
        path: String,
        /// The unavailable dependency.
        dependency: String,
    },

    /// The module exists but could not be built.
    #[error("module `{path}` is malformed: {message}")]
    Malformed {
        /// Module being loaded.
        path: String,
        /// What went wrong.
        message: String,
    },
}

/// Fatal discovery failure: a category module exists but did not load.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("failed to load check module `{path}`")]
#[diagnostic(
    code(operator_lint::discovery::module),
    help("only a module that does not exist is skipped; fix the module or remove its registration")
)]
pub struct DiscoveryError {
    /// Module path that failed.
    pub path: String,
    /// Resolver error.
    #[source]
    pub source: ResolveError,
}

/// Resolves dotted module paths to plugin modules.
pub trait ModuleResolver {
    /// Loads the module registered under `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] if nothing is registered under
    /// `path`, or another variant if the module fails to load.
    fn resolve(&self, path: &str) -> Result<CheckModule, ResolveError>;
}

impl<R: ModuleResolver + ?Sized> ModuleResolver for &R {
    fn resolve(&self, path: &str) -> Result<CheckModule, ResolveError> {
        (**self).resolve(path)
    }
}

/// Builds a module on demand.
pub type ModuleLoader = fn() -> Result<CheckModule, ResolveError>;

/// A resolver backed by a static table of module loaders.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    modules: HashMap<String, ModuleLoader>,
}

impl StaticResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a loader under a dotted path, replacing any previous one.
    #[must_use]
    pub fn module(mut self, path: impl Into<String>, loader: ModuleLoader) -> Self {
        self.modules.insert(path.into(), loader);
        self
    }
}

impl ModuleResolver for StaticResolver {
    fn resolve(&self, path: &str) -> Result<CheckModule, ResolveError> {
        match self.modules.get(path) {
            Some(loader) => loader(),
            None => Err(ResolveError::NotFound {
                path: path.to_string(),
            }),
        }
    }
}

/// Discovered checks keyed by category, in category declaration order.
#[derive(Debug, Clone, Default)]
pub struct CheckMap {
    entries: Vec<(&'static str, Vec<Check>)>,
}

impl CheckMap {
    /// Checks for a category; empty if the category is unknown.
    #[must_use]
    pub fn get(&self, category: &str) -> &[Check] {
        self.entries
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, checks)| checks.as_slice())
            .unwrap_or_default()
    }

    /// Returns true if the category has an entry.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|(name, _)| *name == category)
    }

    /// Iterates `(category, checks)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[Check])> {
        self.entries
            .iter()
            .map(|(name, checks)| (*name, checks.as_slice()))
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of checks across categories.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.entries.iter().map(|(_, checks)| checks.len()).sum()
    }

    /// Keeps only checks for which `keep(category, check)` is true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Check) -> bool) {
        for (category, checks) in &mut self.entries {
            let category: &str = *category;
            checks.retain(|check| keep(category, check));
        }
    }
}

/// Resolves `<suite>.<category>` for every category and collects its checks.
///
/// Always returns one entry per category, possibly empty. Nothing is
/// cached; every call resolves the modules again.
///
/// # Errors
///
/// Returns an error if a category module exists but fails to resolve.
pub fn discover<R: ModuleResolver + ?Sized>(
    resolver: &R,
    suite: &str,
    categories: &[Category],
) -> Result<CheckMap, DiscoveryError> {
    let mut map = CheckMap::default();

    for category in categories {
        let mut checks = Vec::new();
        let path = format!("{suite}.{}", category.name);

        match resolver.resolve(&path) {
            Ok(module) => {
                for check in module.checks() {
                    debug!(
                        "Detected {} check with name {} in {}",
                        category.name,
                        check.name(),
                        suite
                    );
                    checks.push(*check);
                }
            }
            Err(ResolveError::NotFound { path: missing }) if missing == path => {
                debug!("No {} checks in {}", category.name, suite);
            }
            Err(source) => return Err(DiscoveryError { path, source }),
        }

        map.entries.push((category.name, checks));
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::SUPPORTED_CATEGORIES;
    use crate::check::{no_outcomes, Outcomes};
    use crate::model::Target;

    fn check_a<'a>(_: Target<'a>) -> Outcomes<'a> {
        no_outcomes()
    }

    fn check_b<'a>(_: Target<'a>) -> Outcomes<'a> {
        no_outcomes()
    }

    fn helper_foo<'a>(_: Target<'a>) -> Outcomes<'a> {
        no_outcomes()
    }

    fn operator_module() -> Result<CheckModule, ResolveError> {
        Ok(CheckModule::new("suite.operator")
            .function("check_b", check_b)
            .function("helper_foo", helper_foo)
            .function("check_a", check_a))
    }

    fn broken_module() -> Result<CheckModule, ResolveError> {
        Err(ResolveError::MissingDependency {
            path: "suite.bundle".to_string(),
            dependency: "yaml".to_string(),
        })
    }

    fn nested_missing_module() -> Result<CheckModule, ResolveError> {
        Err(ResolveError::NotFound {
            path: "suite.shared".to_string(),
        })
    }

    #[test]
    fn empty_suite_has_every_category_empty() {
        let map = discover(&StaticResolver::new(), "nothing", SUPPORTED_CATEGORIES).unwrap();
        assert_eq!(map.len(), SUPPORTED_CATEGORIES.len());
        for category in SUPPORTED_CATEGORIES {
            assert!(map.contains(category.name));
            assert!(map.get(category.name).is_empty());
        }
    }

    #[test]
    fn collects_prefixed_members_in_declaration_order() {
        let resolver = StaticResolver::new().module("suite.operator", operator_module);
        let map = discover(&resolver, "suite", SUPPORTED_CATEGORIES).unwrap();

        let names: Vec<&str> = map.get("operator").iter().map(Check::name).collect();
        assert_eq!(names, ["check_b", "check_a"]);
        assert!(map.get("bundle").is_empty());
        assert_eq!(map.check_count(), 2);
    }

    #[test]
    fn failing_module_is_fatal() {
        let resolver = StaticResolver::new()
            .module("suite.operator", operator_module)
            .module("suite.bundle", broken_module);
        let err = discover(&resolver, "suite", SUPPORTED_CATEGORIES).unwrap_err();
        assert_eq!(err.path, "suite.bundle");
        assert!(matches!(err.source, ResolveError::MissingDependency { .. }));
    }

    #[test]
    fn not_found_for_another_path_is_fatal() {
        let resolver = StaticResolver::new().module("suite.operator", nested_missing_module);
        let err = discover(&resolver, "suite", SUPPORTED_CATEGORIES).unwrap_err();
        assert_eq!(err.path, "suite.operator");
    }

    #[test]
    fn retain_drops_checks_by_name() {
        let resolver = StaticResolver::new().module("suite.operator", operator_module);
        let mut map = discover(&resolver, "suite", SUPPORTED_CATEGORIES).unwrap();
        map.retain(|_, check| check.name() != "check_b");

        let names: Vec<&str> = map.get("operator").iter().map(Check::name).collect();
        assert_eq!(names, ["check_a"]);
    }

    #[test]
    fn unknown_category_lookup_is_empty() {
        let map = CheckMap::default();
        assert!(map.get("repo").is_empty());
        assert!(!map.contains("repo"));
    }
}
