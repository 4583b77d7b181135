//! Checks for the `bundle` category.

use crate::wrong_target;
use operator_lint_core::{
    outcomes, CheckModule, Outcome, Outcomes, ResolveError, Target, TargetKind, ANNOTATIONS_FILE,
    MANIFESTS_DIR,
};
use tracing::trace;

/// Builds the `bundle` module.
///
/// # Errors
///
/// Never fails; the signature matches [`operator_lint_core::ModuleLoader`].
#[allow(clippy::unnecessary_wraps)]
pub fn register() -> Result<CheckModule, ResolveError> {
    Ok(CheckModule::new(format!("{}.bundle", crate::SUITE))
        .function("check_manifests", check_manifests)
        .function("check_annotations", check_annotations)
        .function("check_version", check_version))
}

/// Fails bundles without any manifest file.
#[must_use]
pub fn check_manifests(target: Target<'_>) -> Outcomes<'_> {
    let Some(bundle) = target.as_bundle() else {
        return wrong_target(TargetKind::Bundle, target);
    };

    let mut found = Vec::new();
    if bundle.manifests.is_empty() {
        found.push(Outcome::failure(
            target,
            format!("Bundle has no files under {MANIFESTS_DIR}/"),
        ));
    } else {
        trace!("{} has {} manifests", bundle, bundle.manifests.len());
    }
    outcomes(found)
}

/// Fails bundles without `metadata/annotations.yaml`.
#[must_use]
pub fn check_annotations(target: Target<'_>) -> Outcomes<'_> {
    let Some(bundle) = target.as_bundle() else {
        return wrong_target(TargetKind::Bundle, target);
    };

    let mut found = Vec::new();
    if bundle.annotations.is_none() {
        found.push(Outcome::failure(
            target,
            format!("Bundle is missing {ANNOTATIONS_FILE}"),
        ));
    }
    outcomes(found)
}

/// Warns when the bundle version is not a semantic version.
#[must_use]
pub fn check_version(target: Target<'_>) -> Outcomes<'_> {
    let Some(bundle) = target.as_bundle() else {
        return wrong_target(TargetKind::Bundle, target);
    };

    let mut found = Vec::new();
    if !is_semver(&bundle.version) {
        found.push(Outcome::warning(
            target,
            format!(
                "Version `{}` is not a semantic version (MAJOR.MINOR.PATCH)",
                bundle.version
            ),
        ));
    }
    outcomes(found)
}

fn is_semver(version: &str) -> bool {
    let (rest, build) = match version.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (version, None),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let numbers: Vec<&str> = core.split('.').collect();
    let core_ok = numbers.len() == 3
        && numbers.iter().all(|n| {
            !n.is_empty()
                && n.chars().all(|c| c.is_ascii_digit())
                && (n.len() == 1 || !n.starts_with('0'))
        });

    core_ok && pre.map_or(true, is_identifier_list) && build.map_or(true, is_identifier_list)
}

fn is_identifier_list(s: &str) -> bool {
    s.split('.').all(|part| {
        !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
