//! Permission enumeration.

use crate::evaluate::allows;
use crate::{Permission, Query, Registry, Result, Target};
use std::collections::BTreeSet;

/// Every permission known to the target's rule that `subject` is granted.
///
/// Each known permission is a separate [`allows`](crate::Authorization::allows)
/// query, so every predicate runs on its own provider instance.
pub(crate) fn permissions<S: 'static>(
    registry: &Registry<S>,
    subject: &S,
    target: Target<'_>,
) -> Result<BTreeSet<Permission>> {
    let target_type = target.target_type();
    let binding = registry.lookup(target_type)?;
    let mut granted = BTreeSet::new();
    for permission in binding.permissions() {
        if allows(registry, subject, &Query::One(permission.clone()), target)? {
            granted.insert(permission);
        }
    }

    tracing::debug!(
        target_type = %target_type,
        rule = binding.rule_name(),
        granted = granted.len(),
        "enumerated permissions"
    );
    Ok(granted)
}
