//! Rule-based authorization.
//!
//! An [`Authorization`] maps target types to rule providers. A query names a
//! subject, one or more permissions, and optionally an object; the provider
//! registered for the object's exact type (or the global provider when there
//! is no object) decides.
//!
//! # Core Concepts
//!
//! - **Rule provider**: a `Default` type implementing [`Rule<S, T>`] for
//!   objects of type `T`, or [`GlobalRule<S>`] for permissions without an
//!   object. It lists one predicate per permission in a [`Predicates`] table.
//! - **Target**: [`Target::None`] or [`Target::Object`]. Global predicates
//!   are called with the subject only; object predicates with the subject and
//!   the object.
//! - **Errors**: [`Error::RuleNotFound`] and [`Error::UnknownPermission`] are
//!   configuration errors and are never turned into a denial.
//!   [`Error::Denied`] comes only from [`Authorization::check`].
//!
//! # Example
//!
//! ```
//! use authz::{
//!     Authorization, GlobalPredicate, GlobalRule, ObjectPredicate, Predicates, Rule, Target,
//! };
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     id: u32,
//!     is_admin: bool,
//! }
//!
//! struct Article {
//!     author: u32,
//! }
//!
//! #[derive(Default)]
//! struct AppRule;
//!
//! impl GlobalRule<User> for AppRule {
//!     fn predicates(predicates: &mut Predicates<GlobalPredicate<Self, User>>) {
//!         predicates.add("add_blog", |_, user| user.is_admin);
//!     }
//! }
//!
//! #[derive(Default)]
//! struct ArticleRule;
//!
//! impl Rule<User, Article> for ArticleRule {
//!     fn predicates(predicates: &mut Predicates<ObjectPredicate<Self, User, Article>>) {
//!         predicates
//!             .add("read", |_, _, _| true)
//!             .add("change", |_, user, article| article.author == user.id);
//!     }
//! }
//!
//! let mut authz = Authorization::<User>::new();
//! authz
//!     .register_global::<AppRule>()
//!     .register::<ArticleRule, Article>();
//!
//! let alice = User { id: 1, is_admin: false };
//! let bob = User { id: 2, is_admin: false };
//! let article = Article { author: 1 };
//!
//! assert!(authz.allows(&alice, "change", &article)?);
//! assert!(!authz.allows(&bob, "change", &article)?);
//! assert!(authz.allows(&bob, ["read"], &article)?);
//! assert!(!authz.allows(&alice, "add_blog", Target::None)?);
//! assert!(authz.check(&bob, "change", &article).unwrap_err().is_denied());
//! # Ok::<(), authz::Error>(())
//! ```

mod authorization;
mod binding;
mod enumerate;
mod error;
mod evaluate;
mod permission;
mod registry;
mod resolve;
mod rule;
mod target;

pub use authorization::{Authorization, AuthorizationBuilder};
pub use error::{Error, Result};
pub use permission::{Permission, Query};
pub use registry::{Registry, Targets};
pub use rule::{GlobalPredicate, GlobalRule, ObjectPredicate, Predicates, Rule};
pub use target::{Object, Target, TargetType};
