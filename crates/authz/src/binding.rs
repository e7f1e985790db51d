//! Type-erased rule bindings.
//!
//! The registry stores one [`Binding`] per target type. A binding owns the
//! provider's permission table and creates a fresh provider [`Instance`] for
//! every query. Predicates resolved on an instance keep their call shape:
//! subject-only for global rules, subject and object for object rules.

use crate::rule::{GlobalPredicate, ObjectPredicate, Predicates};
use crate::{Error, GlobalRule, Object, Permission, Result, Rule, TargetType};
use std::any::{type_name, Any};

/// A rule provider type bound to one target type.
pub(crate) trait Binding<S>: Send + Sync {
    fn rule_name(&self) -> &'static str;

    fn permissions(&self) -> Vec<Permission>;

    /// Create a fresh provider instance for one query.
    fn instantiate(&self) -> Box<dyn Instance<S> + '_>;
}

/// A provider instance, alive for the duration of one query.
pub(crate) trait Instance<S> {
    fn predicate(&self, permission: &str) -> Option<Predicate<'_, S>>;
}

/// A predicate resolved on a provider instance.
pub(crate) enum Predicate<'r, S> {
    /// Called with the subject only.
    Subject(Box<dyn Fn(&S) -> bool + 'r>),
    /// Called with the subject and an object of `target`.
    SubjectObject {
        target: TargetType,
        call: Box<dyn Fn(&S, Object<'_>) -> Result<bool> + 'r>,
    },
}

impl<'r, S> Predicate<'r, S> {
    fn subject<F>(call: F) -> Self
    where
        F: Fn(&S) -> bool + 'r,
    {
        Predicate::Subject(Box::new(call))
    }

    fn subject_object<F>(target: TargetType, call: F) -> Self
    where
        F: Fn(&S, Object<'_>) -> Result<bool> + 'r,
    {
        Predicate::SubjectObject {
            target,
            call: Box::new(call),
        }
    }
}

pub(crate) struct GlobalBinding<R, S> {
    predicates: Predicates<GlobalPredicate<R, S>>,
}

impl<R: GlobalRule<S>, S: 'static> GlobalBinding<R, S> {
    pub(crate) fn new() -> Self {
        let mut predicates = Predicates::new();
        R::predicates(&mut predicates);
        Self { predicates }
    }
}

impl<R: GlobalRule<S>, S: 'static> Binding<S> for GlobalBinding<R, S> {
    fn rule_name(&self) -> &'static str {
        type_name::<R>()
    }

    fn permissions(&self) -> Vec<Permission> {
        self.predicates.permissions().cloned().collect()
    }

    fn instantiate(&self) -> Box<dyn Instance<S> + '_> {
        Box::new(GlobalInstance {
            rule: R::default(),
            predicates: &self.predicates,
        })
    }
}

struct GlobalInstance<'b, R, S> {
    rule: R,
    predicates: &'b Predicates<GlobalPredicate<R, S>>,
}

impl<R: GlobalRule<S>, S: 'static> Instance<S> for GlobalInstance<'_, R, S> {
    fn predicate(&self, permission: &str) -> Option<Predicate<'_, S>> {
        let predicate = *self.predicates.get(permission)?;
        let rule = &self.rule;
        Some(Predicate::subject(move |subject| predicate(rule, subject)))
    }
}

pub(crate) struct ObjectBinding<R, S, T> {
    predicates: Predicates<ObjectPredicate<R, S, T>>,
}

impl<R: Rule<S, T>, S: 'static, T: Any> ObjectBinding<R, S, T> {
    pub(crate) fn new() -> Self {
        let mut predicates = Predicates::new();
        R::predicates(&mut predicates);
        Self { predicates }
    }
}

impl<R: Rule<S, T>, S: 'static, T: Any> Binding<S> for ObjectBinding<R, S, T> {
    fn rule_name(&self) -> &'static str {
        type_name::<R>()
    }

    fn permissions(&self) -> Vec<Permission> {
        self.predicates.permissions().cloned().collect()
    }

    fn instantiate(&self) -> Box<dyn Instance<S> + '_> {
        Box::new(ObjectInstance {
            rule: R::default(),
            predicates: &self.predicates,
        })
    }
}

struct ObjectInstance<'b, R, S, T> {
    rule: R,
    predicates: &'b Predicates<ObjectPredicate<R, S, T>>,
}

impl<R: Rule<S, T>, S: 'static, T: Any> Instance<S> for ObjectInstance<'_, R, S, T> {
    fn predicate(&self, permission: &str) -> Option<Predicate<'_, S>> {
        let predicate = *self.predicates.get(permission)?;
        let rule = &self.rule;
        let expected = TargetType::of::<T>();
        Some(Predicate::subject_object(expected, move |subject, object| {
            let value = object.downcast::<T>().ok_or(Error::TargetMismatch {
                expected,
                found: object.target_type(),
            })?;
            Ok(predicate(rule, subject, value))
        }))
    }
}
