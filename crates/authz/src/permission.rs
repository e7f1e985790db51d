//! Permission identifiers and permission queries.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// A permission identifier, e.g. `read` or `add_article`.
///
/// Permissions are opaque names: there is no hierarchy and no wildcard.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permission(String);

impl Permission {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Permission {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Permission {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for Permission {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Permission {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&String> for Permission {
    fn from(name: &String) -> Self {
        Self(name.clone())
    }
}

/// The permission(s) a query asks about.
///
/// A batch is granted only if every permission in it is granted. An empty
/// batch is vacuously granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    One(Permission),
    All(Vec<Permission>),
}

impl Query {
    pub fn one(permission: impl Into<Permission>) -> Self {
        Self::One(permission.into())
    }

    pub fn all<I, P>(permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self::All(permissions.into_iter().map(Into::into).collect())
    }

    /// The permissions in this query, in the order given.
    pub fn permissions(&self) -> &[Permission] {
        match self {
            Query::One(permission) => std::slice::from_ref(permission),
            Query::All(permissions) => permissions,
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Query::All(_))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::One(permission) => write!(f, "{permission}"),
            Query::All(permissions) => {
                f.write_str("[")?;
                for (i, permission) in permissions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{permission}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<Permission> for Query {
    fn from(permission: Permission) -> Self {
        Self::One(permission)
    }
}

impl From<&Permission> for Query {
    fn from(permission: &Permission) -> Self {
        Self::One(permission.clone())
    }
}

impl From<&str> for Query {
    fn from(permission: &str) -> Self {
        Self::one(permission)
    }
}

impl From<String> for Query {
    fn from(permission: String) -> Self {
        Self::one(permission)
    }
}

impl From<&String> for Query {
    fn from(permission: &String) -> Self {
        Self::one(permission)
    }
}

impl<const N: usize> From<[&str; N]> for Query {
    fn from(permissions: [&str; N]) -> Self {
        Self::all(permissions)
    }
}

impl<const N: usize> From<&[&str; N]> for Query {
    fn from(permissions: &[&str; N]) -> Self {
        Self::all(permissions.iter().copied())
    }
}

impl From<&[&str]> for Query {
    fn from(permissions: &[&str]) -> Self {
        Self::all(permissions.iter().copied())
    }
}

impl From<Vec<&str>> for Query {
    fn from(permissions: Vec<&str>) -> Self {
        Self::all(permissions)
    }
}

impl From<Vec<String>> for Query {
    fn from(permissions: Vec<String>) -> Self {
        Self::all(permissions)
    }
}

impl From<Vec<Permission>> for Query {
    fn from(permissions: Vec<Permission>) -> Self {
        Self::All(permissions)
    }
}

impl From<&BTreeSet<Permission>> for Query {
    fn from(permissions: &BTreeSet<Permission>) -> Self {
        Self::All(permissions.iter().cloned().collect())
    }
}

impl<P: Into<Permission>> FromIterator<P> for Query {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::all(iter)
    }
}
