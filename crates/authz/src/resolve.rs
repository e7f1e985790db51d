//! Rule and permission resolution.

use crate::binding::{Binding, Instance, Predicate};
use crate::{Error, Permission, Registry, Result, Target, TargetType};

/// A fresh rule provider instance, resolved for one query.
pub(crate) struct ResolvedRule<'a, S> {
    target_type: TargetType,
    binding: &'a dyn Binding<S>,
    instance: Box<dyn Instance<S> + 'a>,
}

/// Find the rule registered for the target's exact type and instantiate it.
pub(crate) fn resolve_rule<'a, S: 'static>(
    registry: &'a Registry<S>,
    target: &Target<'_>,
) -> Result<ResolvedRule<'a, S>> {
    let target_type = target.target_type();
    let binding = registry.lookup(target_type)?;
    Ok(ResolvedRule {
        target_type,
        binding,
        instance: binding.instantiate(),
    })
}

impl<S> ResolvedRule<'_, S> {
    pub(crate) fn target_type(&self) -> TargetType {
        self.target_type
    }

    pub(crate) fn rule_name(&self) -> &'static str {
        self.binding.rule_name()
    }

    pub(crate) fn find_predicate(&self, permission: &Permission) -> Result<Predicate<'_, S>> {
        self.instance
            .predicate(permission.as_str())
            .ok_or_else(|| Error::UnknownPermission {
                permission: permission.clone(),
                rule: self.rule_name(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{GlobalPredicate, Predicates};
    use crate::GlobalRule;
    use std::cell::Cell;

    struct User;

    thread_local! {
        static CREATED: Cell<usize> = const { Cell::new(0) };
    }

    struct Counting;

    impl Default for Counting {
        fn default() -> Self {
            CREATED.with(|created| created.set(created.get() + 1));
            Counting
        }
    }

    impl GlobalRule<User> for Counting {
        fn predicates(predicates: &mut Predicates<GlobalPredicate<Self, User>>) {
            predicates.add("ping", |_, _| true);
        }
    }

    #[test]
    fn test_each_resolution_creates_a_fresh_instance() {
        let mut registry = Registry::<User>::new();
        registry.register_global::<Counting>();
        let before = CREATED.with(Cell::get);

        let first = resolve_rule(&registry, &Target::None).unwrap();
        let second = resolve_rule(&registry, &Target::None).unwrap();

        assert_eq!(CREATED.with(Cell::get), before + 2);
        assert_eq!(first.target_type(), TargetType::NoObject);
        assert!(second.rule_name().ends_with("Counting"));
    }

    #[test]
    fn test_unknown_permission() {
        let mut registry = Registry::<User>::new();
        registry.register_global::<Counting>();
        let rule = resolve_rule(&registry, &Target::None).unwrap();

        assert!(rule.find_predicate(&Permission::new("ping")).is_ok());
        let err = rule.find_predicate(&Permission::new("pong")).err().unwrap();
        assert!(matches!(
            err,
            Error::UnknownPermission { ref permission, .. } if permission == "pong"
        ));
    }

    #[test]
    fn test_missing_rule() {
        let registry = Registry::<User>::new();
        let doc = 42u8;
        let err = resolve_rule(&registry, &Target::of(&doc)).err().unwrap();
        assert!(matches!(err, Error::RuleNotFound { .. }));
    }
}
