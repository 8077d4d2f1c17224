//! Component descriptors for introspection and diagnostics.

use crate::key::Key;
use crate::registration::Registration;
use crate::scope::Scope;

/// Read-only view of one component definition.
///
/// # Examples
///
/// ```rust
/// use ferrous_beans::{Component, ComponentCollection, Key, Scope};
///
/// #[derive(Default)]
/// struct Database;
/// impl Component for Database {}
///
/// #[derive(Default)]
/// struct Repository;
/// impl Component for Repository {}
///
/// let mut components = ComponentCollection::new();
/// components.add_singleton::<Database>([]).unwrap();
/// components.add_named_prototype::<Repository>("users", [Key::of::<Database>()]).unwrap();
///
/// let descriptors = components.descriptors();
/// let repo = descriptors.iter().find(|d| d.is_named()).unwrap();
/// assert_eq!(repo.scope, Scope::Prototype);
/// assert_eq!(repo.service_name(), Some("users"));
/// assert_eq!(repo.dependencies, vec![Key::of::<Database>()]);
/// ```
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    /// The component key
    pub key: Key,
    /// Component scope
    pub scope: Scope,
    /// Declared dependency keys, in injection order
    pub dependencies: Vec<Key>,
    /// Type name of the value the factory produces
    pub impl_type_name: &'static str,
}

impl ComponentDescriptor {
    /// Component name for named registrations, or None
    pub fn service_name(&self) -> Option<&'static str> {
        self.key.service_name()
    }

    pub fn type_name(&self) -> &'static str {
        self.key.display_name()
    }

    pub fn is_named(&self) -> bool {
        self.service_name().is_some()
    }
}

impl From<&Registration> for ComponentDescriptor {
    fn from(registration: &Registration) -> Self {
        Self {
            key: registration.key,
            scope: registration.scope,
            dependencies: registration.dependencies.clone(),
            impl_type_name: registration.impl_type_name,
        }
    }
}
