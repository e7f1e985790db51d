//! Mapping from target types to rule providers.

use crate::binding::{Binding, GlobalBinding, ObjectBinding};
use crate::{Error, GlobalRule, Result, Rule, TargetType};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Rule registry.
///
/// Holds at most one rule provider per target type. Registering again for a
/// target type replaces the earlier provider. Lookup is by exact type: a rule
/// registered for `Article` is not used for a `BookReview` that wraps one.
///
/// Registration takes `&mut self`, so a registry is populated during setup
/// and shared read-only afterwards.
pub struct Registry<S> {
    rules: HashMap<TargetType, Box<dyn Binding<S>>>,
}

impl<S: 'static> Registry<S> {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Register `R` for permissions that take no object.
    pub fn register_global<R: GlobalRule<S>>(&mut self) -> &mut Self {
        self.insert(TargetType::NoObject, Box::new(GlobalBinding::<R, S>::new()));
        self
    }

    /// Register `R` for objects of type `T`.
    pub fn register<R, T>(&mut self) -> &mut Self
    where
        R: Rule<S, T>,
        T: Any,
    {
        self.insert(TargetType::of::<T>(), Box::new(ObjectBinding::<R, S, T>::new()));
        self
    }

    /// Register `R` for every type in the tuple `L`, e.g. `(BookReview, MovieReview)`.
    pub fn register_each<R, L>(&mut self) -> &mut Self
    where
        L: Targets<R, S>,
    {
        L::register_into(self);
        self
    }

    pub fn contains(&self, target: TargetType) -> bool {
        self.rules.contains_key(&target)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn lookup(&self, target: TargetType) -> Result<&dyn Binding<S>> {
        self.rules
            .get(&target)
            .map(|binding| binding.as_ref())
            .ok_or(Error::RuleNotFound { target })
    }

    fn insert(&mut self, target: TargetType, binding: Box<dyn Binding<S>>) {
        let rule = binding.rule_name();
        match self.rules.insert(target, binding) {
            Some(previous) => tracing::debug!(
                target_type = %target,
                rule,
                previous = previous.rule_name(),
                "replaced rule"
            ),
            None => tracing::debug!(target_type = %target, rule, "registered rule"),
        }
    }
}

impl<S: 'static> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.rules
                    .iter()
                    .map(|(target, binding)| (target.name(), binding.rule_name())),
            )
            .finish()
    }
}

/// A tuple of target types registered with the same rule provider.
pub trait Targets<R, S> {
    fn register_into(registry: &mut Registry<S>);
}

macro_rules! impl_targets {
    ($($t:ident),+) => {
        impl<R, S: 'static, $($t: Any),+> Targets<R, S> for ($($t,)+)
        where
            $(R: Rule<S, $t>,)+
        {
            fn register_into(registry: &mut Registry<S>) {
                $(registry.register::<R, $t>();)+
            }
        }
    };
}

impl_targets!(A);
impl_targets!(A, B);
impl_targets!(A, B, C);
impl_targets!(A, B, C, D);
impl_targets!(A, B, C, D, E);
impl_targets!(A, B, C, D, E, F);
impl_targets!(A, B, C, D, E, F, G);
impl_targets!(A, B, C, D, E, F, G, H);
