//! Resolver traits for component resolution.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::registration::AnyArc;

/// Core resolver trait for object-safe component resolution.
///
/// Most users should use the [`Resolver`] trait instead, which provides
/// typed generic methods built on top of this trait.
pub trait ResolverCore: Send + Sync {
    /// Resolves a single component, honoring its scope.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - The resolved component wrapped in `Arc<dyn Any>`
    /// * `Err(DiError)` - Unknown key, circular dependency, injection failure
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc>;
}

/// High-level resolver interface with generic methods for type-safe resolution.
///
/// # Examples
///
/// ```
/// use ferrous_beans::{ComponentCollection, Component, Resolver};
///
/// #[derive(Default)]
/// struct Port(u16);
/// impl Component for Port {}
///
/// let mut components = ComponentCollection::new();
/// components.add_named_singleton::<Port>("http", []).unwrap();
///
/// let container = components.build();
/// let port = container.get_named::<Port>("http").unwrap();
/// assert_eq!(port.0, 0);
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves the component registered under `key` as `T`.
    fn resolve_as<T: 'static + Send + Sync>(&self, key: &Key) -> DiResult<Arc<T>> {
        let any = self.resolve_any(key)?;
        any.downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Resolves the default registration of `T`.
    fn get<T: 'static + Send + Sync>(&self) -> DiResult<Arc<T>> {
        self.resolve_as::<T>(&Key::of::<T>())
    }

    /// Resolves the named registration of `T`.
    fn get_named<T: 'static + Send + Sync>(&self, name: &'static str) -> DiResult<Arc<T>> {
        self.resolve_as::<T>(&Key::named::<T>(name))
    }

    /// Resolves the default registration of `T`, panicking on failure.
    fn get_required<T: 'static + Send + Sync>(&self) -> Arc<T> {
        self.get::<T>()
            .unwrap_or_else(|e| panic!("Failed to resolve {}: {}", std::any::type_name::<T>(), e))
    }

    /// Resolves the named registration of `T`, panicking on failure.
    fn get_named_required<T: 'static + Send + Sync>(&self, name: &'static str) -> Arc<T> {
        self.get_named::<T>(name)
            .unwrap_or_else(|e| panic!("Failed to resolve {}[\"{}\"]: {}", std::any::type_name::<T>(), name, e))
    }
}
