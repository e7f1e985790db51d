//! The authorization facade.

use crate::{
    enumerate, evaluate, GlobalRule, Permission, Query, Registry, Result, Rule, Target,
    TargetType, Targets,
};
use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;

/// Container of rules and checker of permissions.
///
/// `S` is the subject type. The subject is handed to predicates as is and
/// never inspected here.
pub struct Authorization<S> {
    registry: Registry<S>,
}

impl<S: 'static> Authorization<S> {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    pub fn builder() -> AuthorizationBuilder<S> {
        AuthorizationBuilder {
            registry: Registry::new(),
        }
    }

    /// Register `R` for permissions that take no object.
    pub fn register_global<R: GlobalRule<S>>(&mut self) -> &mut Self {
        self.registry.register_global::<R>();
        self
    }

    /// Register `R` for objects of type `T`, replacing any earlier rule for `T`.
    pub fn register<R, T>(&mut self) -> &mut Self
    where
        R: Rule<S, T>,
        T: Any,
    {
        self.registry.register::<R, T>();
        self
    }

    /// Register `R` for every type in the tuple `L`.
    pub fn register_each<R, L>(&mut self) -> &mut Self
    where
        L: Targets<R, S>,
    {
        self.registry.register_each::<R, L>();
        self
    }

    /// Returns whether `subject` holds the permission(s) on `target`.
    ///
    /// A batch query is granted only if every permission in it is granted;
    /// an empty batch is granted.
    ///
    /// # Errors
    ///
    /// [`Error::RuleNotFound`](crate::Error::RuleNotFound) if nothing is
    /// registered for the target's type, and
    /// [`Error::UnknownPermission`](crate::Error::UnknownPermission) if the rule
    /// has no predicate for a requested permission. A denial is `Ok(false)`.
    pub fn allows<'t>(
        &self,
        subject: &S,
        query: impl Into<Query>,
        target: impl Into<Target<'t>>,
    ) -> Result<bool> {
        evaluate::allows(&self.registry, subject, &query.into(), target.into())
    }

    /// Like [`allows`](Self::allows), but a denial is
    /// [`Error::Denied`](crate::Error::Denied).
    #[tracing::instrument(level = "debug", skip_all, fields(subject = ?subject))]
    pub fn check<'t>(
        &self,
        subject: &S,
        query: impl Into<Query>,
        target: impl Into<Target<'t>>,
    ) -> Result<()>
    where
        S: fmt::Debug,
    {
        evaluate::check(&self.registry, subject, &query.into(), target.into())
    }

    /// Every permission of the target's rule that `subject` is granted.
    pub fn permissions<'t>(
        &self,
        subject: &S,
        target: impl Into<Target<'t>>,
    ) -> Result<BTreeSet<Permission>> {
        enumerate::permissions(&self.registry, subject, target.into())
    }

    pub fn is_registered(&self, target: TargetType) -> bool {
        self.registry.contains(target)
    }

    /// Name of the rule provider registered for `target`.
    pub fn rule_name(&self, target: TargetType) -> Result<&'static str> {
        Ok(self.registry.lookup(target)?.rule_name())
    }

    /// Every permission the rule registered for `target` decides.
    pub fn known_permissions(&self, target: TargetType) -> Result<Vec<Permission>> {
        Ok(self.registry.lookup(target)?.permissions())
    }
}

impl<S: 'static> Default for Authorization<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> From<Registry<S>> for Authorization<S> {
    fn from(registry: Registry<S>) -> Self {
        Self { registry }
    }
}

impl<S> fmt::Debug for Authorization<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorization")
            .field("rules", &self.registry)
            .finish()
    }
}

/// Setup-time registration of rules.
///
/// ```
/// use authz::{Authorization, ObjectPredicate, Predicates, Rule};
///
/// struct User(u32);
/// struct Article { author: u32 }
/// struct Review { author: u32 }
///
/// #[derive(Default)]
/// struct AuthorRule;
///
/// impl Rule<User, Article> for AuthorRule {
///     fn predicates(predicates: &mut Predicates<ObjectPredicate<Self, User, Article>>) {
///         predicates.add("change", |_, user, article| article.author == user.0);
///     }
/// }
///
/// impl Rule<User, Review> for AuthorRule {
///     fn predicates(predicates: &mut Predicates<ObjectPredicate<Self, User, Review>>) {
///         predicates.add("change", |_, user, review| review.author == user.0);
///     }
/// }
///
/// let authz = Authorization::<User>::builder()
///     .rule_for_each::<AuthorRule, (Article, Review)>()
///     .build();
///
/// let review = Review { author: 1 };
/// assert!(authz.allows(&User(1), "change", &review)?);
/// assert!(!authz.allows(&User(2), "change", &review)?);
/// # Ok::<(), authz::Error>(())
/// ```
pub struct AuthorizationBuilder<S> {
    registry: Registry<S>,
}

impl<S: 'static> AuthorizationBuilder<S> {
    pub fn global_rule<R: GlobalRule<S>>(mut self) -> Self {
        self.registry.register_global::<R>();
        self
    }

    pub fn rule<R, T>(mut self) -> Self
    where
        R: Rule<S, T>,
        T: Any,
    {
        self.registry.register::<R, T>();
        self
    }

    pub fn rule_for_each<R, L>(mut self) -> Self
    where
        L: Targets<R, S>,
    {
        self.registry.register_each::<R, L>();
        self
    }

    pub fn build(self) -> Authorization<S> {
        Authorization::from(self.registry)
    }
}
