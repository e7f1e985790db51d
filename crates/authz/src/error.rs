//! Authorization error types.

use crate::{Permission, TargetType};
use thiserror::Error;

/// Authorization errors.
///
/// Only [`Error::Denied`] is an authorization outcome. Every other variant
/// means the registry or the caller is misconfigured.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// No rule is registered for the target type.
    #[error("no rule registered for {target}")]
    RuleNotFound { target: TargetType },

    /// The resolved rule has no predicate for the permission.
    #[error("unknown permission '{permission}' for rule {rule}")]
    UnknownPermission {
        permission: Permission,
        rule: &'static str,
    },

    /// The subject is not allowed to perform the action.
    #[error("{subject} is not allowed to {permission} on {target}")]
    Denied {
        subject: String,
        permission: String,
        target: TargetType,
    },

    /// A rule binding was asked to evaluate a target it was not registered for.
    #[error("rule for {expected} cannot evaluate {found}")]
    TargetMismatch {
        expected: TargetType,
        found: TargetType,
    },
}

impl Error {
    /// Whether this is a denial from [`check`](crate::Authorization::check).
    pub fn is_denied(&self) -> bool {
        matches!(self, Error::Denied { .. })
    }

    /// Whether this error points at registry or permission-name misconfiguration.
    pub fn is_configuration(&self) -> bool {
        !self.is_denied()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
