//! Check functions and the modules that contribute them.

use crate::model::{Target, TargetKind};
use crate::types::Outcome;
use std::fmt;

/// Reserved name prefix marking a module member as a check.
pub const CHECK_PREFIX: &str = "check_";

/// Error raised by a check while it runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The check was handed a target of a category it does not handle.
    #[error("expected a {expected} target, got {found}")]
    UnexpectedTarget {
        /// Category the check handles.
        expected: TargetKind,
        /// Category it received.
        found: TargetKind,
    },

    /// The check could not complete.
    #[error("{0}")]
    Failed(String),
}

/// Lazy stream of outcomes produced by one check invocation.
///
/// An `Err` item aborts the stream it appears in.
pub type Outcomes<'a> = Box<dyn Iterator<Item = Result<Outcome<'a>, CheckError>> + 'a>;

/// Signature every check conforms to.
pub type CheckFn = for<'a> fn(Target<'a>) -> Outcomes<'a>;

/// A named check function.
#[derive(Clone, Copy)]
pub struct Check {
    name: &'static str,
    func: CheckFn,
}

impl Check {
    /// Creates a check.
    #[must_use]
    pub fn new(name: &'static str, func: CheckFn) -> Self {
        Self { name, func }
    }

    /// The name the check was registered under.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the check against a target.
    #[must_use]
    pub fn invoke<'a>(&self, target: Target<'a>) -> Outcomes<'a> {
        (self.func)(target)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Check").field(&self.name).finish()
    }
}

/// Wraps a finished list of outcomes as an [`Outcomes`] stream.
#[must_use]
pub fn outcomes<'a>(items: Vec<Outcome<'a>>) -> Outcomes<'a> {
    Box::new(items.into_iter().map(Ok))
}

/// An [`Outcomes`] stream that yields nothing.
#[must_use]
pub fn no_outcomes<'a>() -> Outcomes<'a> {
    Box::new(std::iter::empty())
}

/// An [`Outcomes`] stream that fails immediately.
#[must_use]
pub fn check_failed<'a>(error: CheckError) -> Outcomes<'a> {
    Box::new(std::iter::once(Err(error)))
}

/// A plugin module: an ordered list of named functions.
///
/// Modules may list helpers alongside checks; discovery only collects
/// members named with [`CHECK_PREFIX`].
#[derive(Debug, Clone, Default)]
pub struct CheckModule {
    path: String,
    members: Vec<Check>,
}

impl CheckModule {
    /// Creates an empty module with the given dotted path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            members: Vec::new(),
        }
    }

    /// Adds a member function.
    #[must_use]
    pub fn function(mut self, name: &'static str, func: CheckFn) -> Self {
        self.members.push(Check::new(name, func));
        self
    }

    /// The dotted path of this module.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[Check] {
        &self.members
    }

    /// Members following the check naming convention, in declaration order.
    pub fn checks(&self) -> impl Iterator<Item = &Check> {
        self.members
            .iter()
            .filter(|m| m.name().starts_with(CHECK_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Operator;

    fn check_flag<'a>(target: Target<'a>) -> Outcomes<'a> {
        outcomes(vec![Outcome::warning(target, "flagged")])
    }

    fn helper_noop<'a>(_target: Target<'a>) -> Outcomes<'a> {
        no_outcomes()
    }

    #[test]
    fn checks_skip_members_without_prefix() {
        let module = CheckModule::new("suite.operator")
            .function("check_flag", check_flag)
            .function("helper_noop", helper_noop);

        assert_eq!(module.members().len(), 2);
        let names: Vec<&str> = module.checks().map(Check::name).collect();
        assert_eq!(names, ["check_flag"]);
    }

    #[test]
    fn invoke_calls_the_function() {
        let op = Operator::new("etcd", "/r");
        let check = Check::new("check_flag", check_flag);
        let produced: Vec<_> = check.invoke(Target::Operator(&op)).collect();
        assert_eq!(produced.len(), 1);
        assert_eq!(produced[0].as_ref().unwrap().reason, "flagged");
    }

    #[test]
    fn unexpected_target_message() {
        let err = CheckError::UnexpectedTarget {
            expected: TargetKind::Bundle,
            found: TargetKind::Operator,
        };
        assert_eq!(err.to_string(), "expected a bundle target, got operator");
    }
}
