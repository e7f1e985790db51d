//! Query targets: an object of some type, or no object at all.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The key a rule is registered under.
///
/// Two target types are equal only if they name the exact same Rust type.
/// Wrapping or embedding a registered type does not make a new type match.
#[derive(Debug, Clone, Copy)]
pub enum TargetType {
    /// Permissions that are not tied to an object.
    NoObject,
    /// Permissions on objects of one concrete type.
    Type { id: TypeId, name: &'static str },
}

impl TargetType {
    pub fn of<T: Any>() -> Self {
        TargetType::Type {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Human-readable name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TargetType::NoObject => "<no object>",
            TargetType::Type { name, .. } => name,
        }
    }
}

impl PartialEq for TargetType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TargetType::NoObject, TargetType::NoObject) => true,
            (TargetType::Type { id: a, .. }, TargetType::Type { id: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for TargetType {}

impl Hash for TargetType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            TargetType::NoObject => state.write_u8(0),
            TargetType::Type { id, .. } => {
                state.write_u8(1);
                id.hash(state);
            }
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A borrowed object whose permissions are being checked.
#[derive(Clone, Copy)]
pub struct Object<'a> {
    value: &'a (dyn Any + 'static),
    target_type: TargetType,
}

impl<'a> Object<'a> {
    pub fn new<T: Any>(value: &'a T) -> Self {
        Self {
            value,
            target_type: TargetType::of::<T>(),
        }
    }

    pub fn target_type(&self) -> TargetType {
        self.target_type
    }

    pub fn downcast<T: Any>(&self) -> Option<&'a T> {
        let value: &'a (dyn Any + 'static) = self.value;
        value.downcast_ref::<T>()
    }
}

impl fmt::Debug for Object<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("type", &self.target_type.name())
            .finish_non_exhaustive()
    }
}

/// What a query is evaluated against.
///
/// `Target::None` routes to the rule registered without a target type and
/// calls its predicates with the subject alone. `Target::Object` routes by the
/// object's exact type and calls predicates with the subject and the object.
///
/// Pass a `Target` by value. Any `&T` converts into an object target, so
/// `&Target::None` becomes an object of type `Target` and finds no rule.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    None,
    Object(Object<'a>),
}

impl<'a> Target<'a> {
    pub fn of<T: Any>(value: &'a T) -> Self {
        Target::Object(Object::new(value))
    }

    pub fn target_type(&self) -> TargetType {
        match self {
            Target::None => TargetType::NoObject,
            Target::Object(object) => object.target_type(),
        }
    }
}

impl<'a, T: Any> From<&'a T> for Target<'a> {
    fn from(value: &'a T) -> Self {
        Target::of(value)
    }
}
