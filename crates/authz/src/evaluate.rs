//! Permission evaluation.
//!
//! A predicate is called with the subject alone for [`Target::None`] and with
//! the subject and the object for [`Target::Object`]. Rule and permission
//! resolution errors propagate; only a predicate returning `false` is a denial.

use crate::binding::Predicate;
use crate::resolve::resolve_rule;
use crate::{Error, Query, Registry, Result, Target, TargetType};
use std::fmt;

/// Whether `subject` holds every permission in `query` on `target`.
///
/// All permissions are resolved before any predicate runs, so an unknown
/// name fails the query even when an earlier permission would deny it.
/// An empty batch is granted.
pub(crate) fn allows<S: 'static>(
    registry: &Registry<S>,
    subject: &S,
    query: &Query,
    target: Target<'_>,
) -> Result<bool> {
    let rule = resolve_rule(registry, &target)?;
    let predicates = query
        .permissions()
        .iter()
        .map(|permission| {
            rule.find_predicate(permission)
                .map(|predicate| (permission, predicate))
        })
        .collect::<Result<Vec<_>>>()?;

    for (permission, predicate) in &predicates {
        if !invoke(predicate, subject, target)? {
            tracing::debug!(
                target_type = %rule.target_type(),
                rule = rule.rule_name(),
                %permission,
                %query,
                "denied"
            );
            return Ok(false);
        }
    }

    tracing::debug!(
        target_type = %rule.target_type(),
        rule = rule.rule_name(),
        %query,
        "allowed"
    );
    Ok(true)
}

/// Like [`allows`], but a denial becomes [`Error::Denied`].
pub(crate) fn check<S: fmt::Debug + 'static>(
    registry: &Registry<S>,
    subject: &S,
    query: &Query,
    target: Target<'_>,
) -> Result<()> {
    if allows(registry, subject, query, target)? {
        return Ok(());
    }
    Err(Error::Denied {
        subject: format!("{subject:?}"),
        permission: query.to_string(),
        target: target.target_type(),
    })
}

fn invoke<S>(predicate: &Predicate<'_, S>, subject: &S, target: Target<'_>) -> Result<bool> {
    let granted = match (predicate, target) {
        (Predicate::Subject(call), Target::None) => call(subject),
        (Predicate::SubjectObject { call, .. }, Target::Object(object)) => call(subject, object)?,
        (Predicate::Subject(_), Target::Object(object)) => {
            return Err(Error::TargetMismatch {
                expected: TargetType::NoObject,
                found: object.target_type(),
            });
        }
        (Predicate::SubjectObject { target: expected, .. }, Target::None) => {
            return Err(Error::TargetMismatch {
                expected: *expected,
                found: TargetType::NoObject,
            });
        }
    };
    tracing::trace!(granted, "predicate evaluated");
    Ok(granted)
}
