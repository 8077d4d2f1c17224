//! Component modules for grouped registration.
//!
//! A module bundles the registrations of one configuration unit so they can
//! be applied to a collection in a single call.

use crate::collection::ComponentCollection;
use crate::error::DiResult;

/// A group of registrations applied to a [`ComponentCollection`].
///
/// # Example
///
/// ```rust
/// use ferrous_beans::{Component, ComponentCollection, ComponentModule, ComponentCollectionExt, DiResult, Key};
///
/// #[derive(Default)]
/// struct Settings;
/// impl Component for Settings {}
///
/// struct SettingsModule;
///
/// impl ComponentModule for SettingsModule {
///     fn register_components(self, components: &mut ComponentCollection) -> DiResult<()> {
///         components.add_singleton::<Settings>([])?;
///         Ok(())
///     }
/// }
///
/// # fn main() -> DiResult<()> {
/// let container = ComponentCollection::new().add_module(SettingsModule)?.build();
/// assert!(container.contains(&Key::of::<Settings>()));
/// # Ok(())
/// # }
/// ```
pub trait ComponentModule {
    /// Register this module's components with the collection.
    fn register_components(self, components: &mut ComponentCollection) -> DiResult<()>;
}

/// Fluent module registration that consumes and returns the collection.
pub trait ComponentCollectionExt {
    fn add_module<M: ComponentModule>(self, module: M) -> DiResult<Self>
    where
        Self: Sized;
}

impl ComponentCollectionExt for ComponentCollection {
    fn add_module<M: ComponentModule>(mut self, module: M) -> DiResult<Self> {
        module.register_components(&mut self)?;
        Ok(self)
    }
}

/// In-place module registration matching the `&mut Self` registration methods.
pub trait ComponentCollectionModuleExt {
    fn add_module_mut<M: ComponentModule>(&mut self, module: M) -> DiResult<&mut Self>;
}

impl ComponentCollectionModuleExt for ComponentCollection {
    fn add_module_mut<M: ComponentModule>(&mut self, module: M) -> DiResult<&mut Self> {
        module.register_components(self)?;
        Ok(self)
    }
}
