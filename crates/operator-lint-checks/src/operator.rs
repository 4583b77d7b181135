//! Checks for the `operator` category.

use crate::wrong_target;
use operator_lint_core::{
    outcomes, CheckModule, Outcome, Outcomes, ResolveError, Target, TargetKind,
};

/// Longest name a DNS-1123 label may have.
const MAX_NAME_LEN: usize = 63;

/// Builds the `operator` module.
///
/// # Errors
///
/// Never fails; the signature matches [`operator_lint_core::ModuleLoader`].
#[allow(clippy::unnecessary_wraps)]
pub fn register() -> Result<CheckModule, ResolveError> {
    Ok(CheckModule::new(format!("{}.operator", crate::SUITE))
        .function("check_operator_name", check_operator_name)
        .function("check_ci_config", check_ci_config)
        .function("check_bundles_present", check_bundles_present))
}

/// Fails operators whose name is not a lowercase DNS-1123 label.
#[must_use]
pub fn check_operator_name(target: Target<'_>) -> Outcomes<'_> {
    let Some(operator) = target.as_operator() else {
        return wrong_target(TargetKind::Operator, target);
    };

    let mut found = Vec::new();
    if !is_dns_label(&operator.name) {
        found.push(Outcome::failure(
            target,
            format!(
                "Operator name `{}` is not a lowercase DNS-1123 label (max {MAX_NAME_LEN} chars)",
                operator.name
            ),
        ));
    }
    outcomes(found)
}

/// Warns when the operator has no `ci.yaml`.
#[must_use]
pub fn check_ci_config(target: Target<'_>) -> Outcomes<'_> {
    let Some(operator) = target.as_operator() else {
        return wrong_target(TargetKind::Operator, target);
    };

    let mut found = Vec::new();
    if operator.config.is_none() {
        found.push(Outcome::warning(target, "Operator has no ci.yaml"));
    }
    outcomes(found)
}

/// Warns when the operator ships no bundles.
#[must_use]
pub fn check_bundles_present(target: Target<'_>) -> Outcomes<'_> {
    let Some(operator) = target.as_operator() else {
        return wrong_target(TargetKind::Operator, target);
    };

    let mut found = Vec::new();
    if operator.bundles.is_empty() {
        found.push(Outcome::warning(target, "Operator has no bundles"));
    }
    outcomes(found)
}

fn is_dns_label(name: &str) -> bool {
    let valid_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-';
    !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name.chars().all(valid_char)
        && !name.starts_with('-')
        && !name.ends_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use operator_lint_core::{Bundle, CheckError, Operator, Severity};

    fn run(
        check: fn(Target<'_>) -> Outcomes<'_>,
        target: Target<'_>,
    ) -> Vec<(Severity, String)> {
        check(target)
            .map(|o| {
                let o = o.unwrap();
                (o.severity, o.reason)
            })
            .collect()
    }

    #[test]
    fn accepts_valid_names() {
        for name in ["etcd", "prometheus-operator", "a1"] {
            let operator = Operator::new(name, "/r");
            assert!(run(check_operator_name, Target::Operator(&operator)).is_empty());
        }
    }

    #[test]
    fn rejects_invalid_names() {
        let long = "a".repeat(64);
        for name in ["Etcd", "-etcd", "etcd-", "etcd_operator", "", long.as_str()] {
            let operator = Operator::new(name, "/r");
            let found = run(check_operator_name, Target::Operator(&operator));
            assert_eq!(found.len(), 1, "{name:?} should be rejected");
            assert_eq!(found[0].0, Severity::Failure);
        }
    }

    #[test]
    fn warns_on_missing_ci_config() {
        let operator = Operator::new("etcd", "/r");
        let found = run(check_ci_config, Target::Operator(&operator));
        assert_eq!(found, [(Severity::Warning, "Operator has no ci.yaml".to_string())]);

        let operator = operator.with_config("/r/ci.yaml");
        assert!(run(check_ci_config, Target::Operator(&operator)).is_empty());
    }

    #[test]
    fn warns_on_missing_bundles() {
        let operator = Operator::new("etcd", "/r");
        assert_eq!(run(check_bundles_present, Target::Operator(&operator)).len(), 1);

        let operator = operator.with_bundle(Bundle::new("etcd", "1.0.0", "/r/1.0.0"));
        assert!(run(check_bundles_present, Target::Operator(&operator)).is_empty());
    }

    #[test]
    fn rejects_bundle_targets() {
        let bundle = Bundle::new("etcd", "1.0.0", "/r/1.0.0");
        let produced: Vec<_> = check_ci_config(Target::Bundle(&bundle)).collect();
        assert_eq!(
            produced[0].as_ref().unwrap_err(),
            &CheckError::UnexpectedTarget {
                expected: TargetKind::Operator,
                found: TargetKind::Bundle,
            }
        );
    }
}
