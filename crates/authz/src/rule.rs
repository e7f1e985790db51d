//! Rule providers and their permission tables.
//!
//! A rule provider is a plain type with one predicate per permission. The
//! provider lists its predicates once, when it is registered, so every
//! permission it knows can be enumerated without name lookups at query time.
//!
//! ```
//! use authz::{GlobalRule, GlobalPredicate, Predicates};
//!
//! struct User {
//!     is_admin: bool,
//! }
//!
//! #[derive(Default)]
//! struct AppRule;
//!
//! impl AppRule {
//!     fn can_add_blog(&self, user: &User) -> bool {
//!         user.is_admin
//!     }
//! }
//!
//! impl GlobalRule<User> for AppRule {
//!     fn predicates(predicates: &mut Predicates<GlobalPredicate<Self, User>>) {
//!         predicates.add("add_blog", Self::can_add_blog);
//!     }
//! }
//! ```

use crate::Permission;
use std::collections::BTreeMap;

/// Predicate for a permission that is not tied to an object.
pub type GlobalPredicate<R, S> = fn(&R, &S) -> bool;

/// Predicate for a permission on an object of type `T`.
pub type ObjectPredicate<R, S, T> = fn(&R, &S, &T) -> bool;

/// Rule provider for permissions that take no object.
///
/// Registered with [`Registry::register_global`](crate::Registry::register_global)
/// and consulted for queries against [`Target::None`](crate::Target::None).
pub trait GlobalRule<S>: Default + 'static {
    /// Add a predicate for every permission this rule decides.
    fn predicates(predicates: &mut Predicates<GlobalPredicate<Self, S>>);
}

/// Rule provider for permissions on objects of type `T`.
///
/// One provider type may implement this for several target types and be
/// registered for each of them.
pub trait Rule<S, T>: Default + 'static {
    /// Add a predicate for every permission this rule decides.
    fn predicates(predicates: &mut Predicates<ObjectPredicate<Self, S, T>>);
}

/// Permission table of one rule provider.
#[derive(Debug, Clone)]
pub struct Predicates<F> {
    table: BTreeMap<Permission, F>,
}

impl<F> Predicates<F> {
    pub(crate) fn new() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Add the predicate deciding `permission`, replacing any earlier one.
    pub fn add(&mut self, permission: impl Into<Permission>, predicate: F) -> &mut Self {
        self.table.insert(permission.into(), predicate);
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub(crate) fn get(&self, permission: &str) -> Option<&F> {
        self.table.get(permission)
    }

    /// Known permissions, in sorted order.
    pub(crate) fn permissions(&self) -> impl Iterator<Item = &Permission> {
        self.table.keys()
    }
}
