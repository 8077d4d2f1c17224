//! Component key types for the container.

use std::any::TypeId;
use std::fmt;

/// Key for component storage and lookup.
///
/// A key identifies one component definition. Unnamed keys identify the
/// default registration of a type; named keys let the same type be
/// registered several times under different names (for example one
/// singleton counter and one prototype counter).
///
/// # Examples
///
/// ```rust
/// use ferrous_beans::Key;
///
/// struct Counter;
///
/// let default_key = Key::of::<Counter>();
/// let named_key = Key::named::<Counter>("prototype_counter");
///
/// assert_ne!(default_key, named_key);
/// assert_eq!(named_key.service_name(), Some("prototype_counter"));
/// assert!(default_key.display_name().ends_with("Counter"));
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Key {
    /// Concrete type key with TypeId and name for diagnostics
    Type(TypeId, &'static str),
    /// Named concrete type key with TypeId, type name, and component name
    Named(TypeId, &'static str, &'static str),
}

impl Key {
    /// Key of the default registration of `T`.
    #[inline(always)]
    pub fn of<T: 'static>() -> Self {
        Key::Type(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    /// Key of a named registration of `T`.
    #[inline(always)]
    pub fn named<T: 'static>(name: &'static str) -> Self {
        Key::Named(TypeId::of::<T>(), std::any::type_name::<T>(), name)
    }

    /// The `TypeId` of the component type this key stands for.
    pub fn component_type_id(&self) -> TypeId {
        match self {
            Key::Type(id, _) | Key::Named(id, _, _) => *id,
        }
    }

    /// Get the type name for display
    ///
    /// Returns the `std::any::type_name` of the component type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Key::Type(_, name) | Key::Named(_, name, _) => name,
        }
    }

    /// Get the component name for named keys, or None for unnamed keys
    pub fn service_name(&self) -> Option<&'static str> {
        match self {
            Key::Type(_, _) => None,
            Key::Named(_, _, name) => Some(name),
        }
    }
}

// Names are diagnostics only; identity is TypeId (+ component name)
impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Type(a, _), Key::Type(b, _)) => a == b,
            (Key::Named(a, _, name_a), Key::Named(b, _, name_b)) => a == b && name_a == name_b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl std::hash::Hash for Key {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Key::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            Key::Named(id, _, name) => {
                1u8.hash(state);
                id.hash(state);
                name.hash(state);
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Type(_, type_name) => write!(f, "{}", type_name),
            Key::Named(_, type_name, name) => write!(f, "{}[\"{}\"]", type_name, name),
        }
    }
}

/// Helper function for creating type keys
#[inline(always)]
pub fn key_of_type<T: 'static>() -> Key {
    Key::of::<T>()
}
