//! Core types for check outcomes and collected reports.

use crate::model::Target;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Severity of a check outcome.
///
/// Each variant is a concrete outcome kind with a fixed numeric rank and
/// label. Variants are declared in ascending rank order so the derived
/// ordering agrees with [`Severity::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory finding, does not block.
    Warning,
    /// Blocking finding.
    Failure,
}

impl Severity {
    /// Numeric rank used for thresholding and sorting.
    #[must_use]
    pub const fn rank(self) -> u32 {
        match self {
            Self::Warning => 40,
            Self::Failure => 90,
        }
    }

    /// Fixed label for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Self::Warning),
            "failure" => Ok(Self::Failure),
            other => Err(format!(
                "unknown severity `{other}`, expected: warning, failure"
            )),
        }
    }
}

/// A single result of applying one check to one target.
///
/// Outcomes borrow their origin; the caller owns the domain objects.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<'a> {
    /// The object this outcome refers to.
    pub origin: Target<'a>,
    /// Human-readable explanation.
    pub reason: String,
    /// Kind of this outcome.
    pub severity: Severity,
}

impl<'a> Outcome<'a> {
    /// Creates an outcome of the given kind.
    #[must_use]
    pub fn new(severity: Severity, origin: Target<'a>, reason: impl Into<String>) -> Self {
        Self {
            origin,
            reason: reason.into(),
            severity,
        }
    }

    /// Creates an advisory outcome.
    #[must_use]
    pub fn warning(origin: Target<'a>, reason: impl Into<String>) -> Self {
        Self::new(Severity::Warning, origin, reason)
    }

    /// Creates a blocking outcome.
    #[must_use]
    pub fn failure(origin: Target<'a>, reason: impl Into<String>) -> Self {
        Self::new(Severity::Failure, origin, reason)
    }

    /// Numeric severity rank.
    #[must_use]
    pub fn rank(&self) -> u32 {
        self.severity.rank()
    }

    /// Kind label, `"warning"` or `"failure"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.severity.label()
    }

    /// Compares two outcomes by severity only.
    #[must_use]
    pub fn cmp_severity(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }

    /// Renders as `kind(origin, reason)`.
    #[must_use]
    pub fn repr(&self) -> String {
        format!("{}({}, {})", self.kind(), self.origin, self.reason)
    }
}

impl From<&Outcome<'_>> for u32 {
    fn from(outcome: &Outcome<'_>) -> Self {
        outcome.rank()
    }
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.kind(), self.origin, self.reason)
    }
}

/// Outcomes collected from a consumed suite run.
#[derive(Debug, Default, Serialize)]
pub struct Report<'a> {
    /// Outcomes in emission order.
    pub outcomes: Vec<Outcome<'a>>,
    /// Number of targets handed to the runner.
    pub targets_checked: usize,
}

impl<'a> Report<'a> {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any failures.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.has_outcomes_at(Severity::Failure)
    }

    /// Checks if any outcome meets or exceeds the given severity threshold.
    #[must_use]
    pub fn has_outcomes_at(&self, severity: Severity) -> bool {
        self.outcomes.iter().any(|o| o.severity >= severity)
    }

    /// Returns outcomes with exactly the given severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Outcome<'a>> {
        self.outcomes
            .iter()
            .filter(|o| o.severity == severity)
            .collect()
    }

    /// Counts outcomes as `(failures, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let failures = self.by_severity(Severity::Failure).len();
        (failures, self.outcomes.len() - failures)
    }
}
