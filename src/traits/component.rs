//! The setter contract components implement to receive their dependencies.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::registration::AnyArc;

/// A type the container can construct and wire.
///
/// The factory registered for a component returns an instance with
/// default-valued fields. The container then resolves every declared
/// dependency key and hands the results to [`inject`](Component::inject)
/// before the instance is published to anyone.
///
/// # Examples
///
/// ```rust
/// use ferrous_beans::{Component, Dependencies, DiResult, Key};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Database;
/// impl Component for Database {}
///
/// #[derive(Default)]
/// struct UserService {
///     db: Option<Arc<Database>>,
/// }
///
/// impl Component for UserService {
///     fn inject(&mut self, deps: &Dependencies) -> DiResult<()> {
///         self.db = Some(deps.get_type::<Database>()?);
///         Ok(())
///     }
/// }
/// ```
pub trait Component: Send + Sync + 'static {
    /// Assigns resolved collaborators. Leaf components keep the default no-op.
    fn inject(&mut self, deps: &Dependencies) -> DiResult<()> {
        let _ = deps;
        Ok(())
    }
}

/// Resolved dependencies of one component under construction.
///
/// Entries are kept in declaration order.
pub struct Dependencies {
    component: Key,
    entries: Vec<(Key, AnyArc)>,
}

impl Dependencies {
    pub(crate) fn new(component: Key, entries: Vec<(Key, AnyArc)>) -> Self {
        Self { component, entries }
    }

    /// Key of the component receiving these dependencies.
    pub fn component(&self) -> &Key {
        &self.component
    }

    /// Typed access to the dependency declared under `key`.
    pub fn get<T: Send + Sync + 'static>(&self, key: &Key) -> DiResult<Arc<T>> {
        let any = self.get_any(key)?;
        any.downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Typed access to the default registration of `T`.
    pub fn get_type<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.get::<T>(&Key::of::<T>())
    }

    /// Typed access to the named registration of `T`.
    pub fn get_named<T: Send + Sync + 'static>(&self, name: &'static str) -> DiResult<Arc<T>> {
        self.get::<T>(&Key::named::<T>(name))
    }

    /// Untyped access to the dependency declared under `key`.
    pub fn get_any(&self, key: &Key) -> DiResult<AnyArc> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.clone())
            .ok_or(DiError::MissingDependency {
                component: self.component,
                dependency: *key,
            })
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
