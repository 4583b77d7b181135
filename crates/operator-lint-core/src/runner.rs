//! Suite runner: dispatches targets to their category's checks.
//!
//! [`SuiteRunner::run`] discovers the suite once and returns a [`SuiteRun`],
//! a pull-based iterator. Nothing runs until the caller asks for the next
//! outcome, and dropping the iterator stops all further check invocations.
//!
//! Emission order is fixed: targets in input order, then checks in discovery
//! order, then each check's own yield order.

use crate::category::{Category, Classifier};
use crate::check::{Check, CheckError, Outcomes};
use crate::loader::{discover, CheckMap, DiscoveryError, ModuleResolver};
use crate::model::Target;
use crate::types::{Outcome, Report};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// A check failed while the suite was running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("check {check} failed on {target}: {source}")]
pub struct RunError {
    /// Name of the failing check.
    pub check: &'static str,
    /// Rendered target the check was running on.
    pub target: String,
    /// Error raised by the check.
    #[source]
    pub source: CheckError,
}

/// Runs check suites resolved through a [`ModuleResolver`].
#[derive(Debug, Clone)]
pub struct SuiteRunner<R> {
    resolver: R,
    classifier: Classifier,
}

impl<R: ModuleResolver> SuiteRunner<R> {
    /// Creates a runner using the default categories.
    #[must_use]
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            classifier: Classifier::default(),
        }
    }

    /// Replaces the declared categories. Order decides ties.
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.classifier = Classifier::new(categories);
        self
    }

    /// The classifier targets are dispatched with.
    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Discovers the checks of a suite for the declared categories.
    ///
    /// # Errors
    ///
    /// Returns an error if a category module exists but fails to load.
    pub fn discover(&self, suite: &str) -> Result<CheckMap, DiscoveryError> {
        discover(&self.resolver, suite, self.classifier.categories())
    }

    /// Discovers `suite` and lazily runs it over `targets`.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails; no check has run at that point.
    pub fn run<'t, I>(
        &self,
        targets: I,
        suite: &str,
    ) -> Result<SuiteRun<'t, I::IntoIter>, DiscoveryError>
    where
        I: IntoIterator<Item = Target<'t>>,
    {
        let checks = self.discover(suite)?;
        Ok(self.run_with(targets, checks))
    }

    /// Lazily runs already discovered checks over `targets`.
    #[must_use]
    pub fn run_with<'t, I>(&self, targets: I, checks: CheckMap) -> SuiteRun<'t, I::IntoIter>
    where
        I: IntoIterator<Item = Target<'t>>,
    {
        SuiteRun::new(targets.into_iter(), self.classifier.clone(), checks)
    }
}

/// Checks queued for the target being processed.
struct Scheduled<'t> {
    target: Target<'t>,
    checks: std::vec::IntoIter<Check>,
}

/// The check whose outcomes are being drained.
struct Running<'t> {
    check: &'static str,
    target: Target<'t>,
    outcomes: Outcomes<'t>,
}

/// Lazy stream of outcomes from a suite run.
///
/// Yields `Err` at most once; the stream ends right after it.
pub struct SuiteRun<'t, I> {
    targets: I,
    classifier: Classifier,
    checks: CheckMap,
    scheduled: Option<Scheduled<'t>>,
    current: Option<Running<'t>>,
    targets_seen: usize,
    finished: bool,
}

impl<'t, I> SuiteRun<'t, I>
where
    I: Iterator<Item = Target<'t>>,
{
    fn new(targets: I, classifier: Classifier, checks: CheckMap) -> Self {
        Self {
            targets,
            classifier,
            checks,
            scheduled: None,
            current: None,
            targets_seen: 0,
            finished: false,
        }
    }

    /// Number of targets pulled from the input so far, skipped ones included.
    #[must_use]
    pub fn targets_seen(&self) -> usize {
        self.targets_seen
    }

    /// The checks this run dispatches to.
    #[must_use]
    pub fn checks(&self) -> &CheckMap {
        &self.checks
    }

    /// Drains the run into a [`Report`].
    ///
    /// # Errors
    ///
    /// Returns the first check failure.
    pub fn into_report(mut self) -> Result<Report<'t>, RunError> {
        let mut report = Report::new();
        for outcome in &mut self {
            report.outcomes.push(outcome?);
        }
        report.targets_checked = self.targets_seen;
        Ok(report)
    }

    fn finish(&mut self) {
        self.finished = true;
        self.current = None;
        self.scheduled = None;
    }
}

impl<'t, I> Iterator for SuiteRun<'t, I>
where
    I: Iterator<Item = Target<'t>>,
{
    type Item = Result<Outcome<'t>, RunError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(running) = self.current.as_mut() {
                match running.outcomes.next() {
                    Some(Ok(outcome)) => return Some(Ok(outcome)),
                    Some(Err(source)) => {
                        let error = RunError {
                            check: running.check,
                            target: running.target.to_string(),
                            source,
                        };
                        self.finish();
                        return Some(Err(error));
                    }
                    None => self.current = None,
                }
            }

            if let Some(scheduled) = self.scheduled.as_mut() {
                if let Some(check) = scheduled.checks.next() {
                    debug!("Running {} check on {}", check.name(), scheduled.target);
                    self.current = Some(Running {
                        check: check.name(),
                        target: scheduled.target,
                        outcomes: check.invoke(scheduled.target),
                    });
                    continue;
                }
                self.scheduled = None;
            }

            let Some(target) = self.targets.next() else {
                self.finish();
                return None;
            };
            self.targets_seen += 1;

            match self.classifier.classify(&target) {
                Some(category) => {
                    let checks = self.checks.get(category.name).to_vec();
                    self.scheduled = Some(Scheduled {
                        target,
                        checks: checks.into_iter(),
                    });
                }
                None => trace!("No category matches {}, skipping", target),
            }
        }
    }
}

impl<'t, I> FusedIterator for SuiteRun<'t, I> where I: Iterator<Item = Target<'t>> {}

/// Discovers `suite` with the default categories and runs it over `targets`.
///
/// # Errors
///
/// Returns an error if discovery fails.
pub fn run_suite<'t, R, I>(
    resolver: &R,
    targets: I,
    suite: &str,
) -> Result<SuiteRun<'t, I::IntoIter>, DiscoveryError>
where
    R: ModuleResolver + ?Sized,
    I: IntoIterator<Item = Target<'t>>,
{
    SuiteRunner::new(resolver).run(targets, suite)
}
