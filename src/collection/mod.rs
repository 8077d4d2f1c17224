//! Component collection: the registration phase of a container.
//!
//! Definitions are added to a `ComponentCollection`, which is then consumed
//! by [`build`](ComponentCollection::build). The resulting
//! [`Container`](crate::Container) is closed: nothing can be registered
//! afterwards.

use std::any::TypeId;
use std::sync::Arc;

use crate::config::ContainerOptions;
use crate::descriptors::ComponentDescriptor;
use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::observer::{Observers, ResolutionObserver};
use crate::provider::{Container, ResolverContext};
use crate::registration::{AnyArc, Ctor, Registration, Registry};
use crate::scope::Scope;
use crate::traits::Component;
use crate::validation::{self, ValidationReport};

pub mod module_system;
pub use module_system::*;

pub struct ComponentCollection {
    registry: Registry,
    observers: Observers,
    options: ContainerOptions,
}

impl Default for ComponentCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentCollection {
    /// Creates a new empty component collection.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            observers: Observers::new(),
            options: ContainerOptions::default(),
        }
    }

    /// Adds a component definition.
    ///
    /// `factory` produces a fresh instance with default-valued fields. When
    /// the container constructs the component it calls the factory, resolves
    /// each key in `dependencies` in order, and passes the results to
    /// [`Component::inject`].
    ///
    /// # Errors
    ///
    /// * [`DiError::DuplicateKey`] if `key` is already registered
    /// * [`DiError::TypeMismatch`] if `key` does not name the type `T`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_beans::{Component, ComponentCollection, DiError, Key, Scope};
    ///
    /// #[derive(Default)]
    /// struct Counter;
    /// impl Component for Counter {}
    ///
    /// let mut components = ComponentCollection::new();
    /// components
    ///     .register(Key::named::<Counter>("shared"), Scope::Singleton, Counter::default, [])
    ///     .unwrap();
    ///
    /// let again = components.register(Key::named::<Counter>("shared"), Scope::Prototype, Counter::default, []);
    /// assert!(matches!(again, Err(DiError::DuplicateKey(_))));
    /// ```
    pub fn register<T, F>(&mut self, key: Key, scope: Scope, factory: F, dependencies: impl IntoIterator<Item = Key>) -> DiResult<&mut Self>
    where
        T: Component,
        F: Fn() -> T + Send + Sync + 'static,
    {
        if key.component_type_id() != TypeId::of::<T>() {
            return Err(DiError::TypeMismatch(std::any::type_name::<T>()));
        }

        let ctor: Ctor = Arc::new(move |ctx: &mut ResolverContext<'_, '_>| -> DiResult<AnyArc> {
            let mut instance = factory();
            let deps = ctx.resolve_dependencies()?;
            instance.inject(&deps)?;
            Ok(Arc::new(instance))
        });

        self.registry.insert(Registration::new(
            key,
            scope,
            ctor,
            dependencies.into_iter().collect(),
            std::any::type_name::<T>(),
        ))?;
        log::trace!("Registered {} component {}", scope, key);
        Ok(self)
    }

    // ----- Default-constructed registrations -----

    /// Registers `T::default` as the singleton under `Key::of::<T>()`.
    pub fn add_singleton<T>(&mut self, dependencies: impl IntoIterator<Item = Key>) -> DiResult<&mut Self>
    where
        T: Component + Default,
    {
        self.register(Key::of::<T>(), Scope::Singleton, T::default, dependencies)
    }

    /// Registers `T::default` as the prototype under `Key::of::<T>()`.
    pub fn add_prototype<T>(&mut self, dependencies: impl IntoIterator<Item = Key>) -> DiResult<&mut Self>
    where
        T: Component + Default,
    {
        self.register(Key::of::<T>(), Scope::Prototype, T::default, dependencies)
    }

    /// Registers `T::default` as a singleton under `Key::named::<T>(name)`.
    pub fn add_named_singleton<T>(&mut self, name: &'static str, dependencies: impl IntoIterator<Item = Key>) -> DiResult<&mut Self>
    where
        T: Component + Default,
    {
        self.register(Key::named::<T>(name), Scope::Singleton, T::default, dependencies)
    }

    /// Registers `T::default` as a prototype under `Key::named::<T>(name)`.
    pub fn add_named_prototype<T>(&mut self, name: &'static str, dependencies: impl IntoIterator<Item = Key>) -> DiResult<&mut Self>
    where
        T: Component + Default,
    {
        self.register(Key::named::<T>(name), Scope::Prototype, T::default, dependencies)
    }

    // ----- Factory registrations -----

    /// Registers a singleton built by `factory` under `Key::of::<T>()`.
    pub fn add_singleton_factory<T, F>(&mut self, factory: F, dependencies: impl IntoIterator<Item = Key>) -> DiResult<&mut Self>
    where
        T: Component,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register(Key::of::<T>(), Scope::Singleton, factory, dependencies)
    }

    /// Registers a prototype built by `factory` under `Key::of::<T>()`.
    pub fn add_prototype_factory<T, F>(&mut self, factory: F, dependencies: impl IntoIterator<Item = Key>) -> DiResult<&mut Self>
    where
        T: Component,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register(Key::of::<T>(), Scope::Prototype, factory, dependencies)
    }

    // ----- Container configuration -----

    /// Adds an observer notified of every resolution.
    pub fn add_observer(&mut self, observer: Arc<dyn ResolutionObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    pub fn with_options(&mut self, options: ContainerOptions) -> &mut Self {
        self.options = options;
        self
    }

    // ----- Introspection -----

    pub fn contains_key(&self, key: &Key) -> bool {
        self.registry.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    /// Descriptors of every definition, in registration order.
    pub fn descriptors(&self) -> Vec<ComponentDescriptor> {
        self.registry.iter().map(ComponentDescriptor::from).collect()
    }

    /// Checks the registration graph without constructing anything.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_beans::{Component, ComponentCollection, Key, ValidationError};
    ///
    /// #[derive(Default)]
    /// struct Service;
    /// impl Component for Service {}
    /// struct Missing;
    ///
    /// let mut components = ComponentCollection::new();
    /// components.add_singleton::<Service>([Key::of::<Missing>()]).unwrap();
    ///
    /// let report = components.validate();
    /// assert!(!report.is_valid());
    /// assert!(matches!(report.errors[0], ValidationError::MissingDependency { .. }));
    /// ```
    pub fn validate(&self) -> ValidationReport {
        validation::analyze(self.registry()).report
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }

    // ----- Build -----

    /// Builds the container, consuming the collection.
    ///
    /// Never fails: unknown dependencies and cycles are reported when the
    /// affected components are resolved.
    pub fn build(self) -> Container {
        Container::new(self.registry, self.observers, self.options)
    }

    /// Validates, builds, and pre-warms singletons if the options ask for it.
    ///
    /// Fails with [`DiError::Validation`] on the first validation error, or
    /// with the first pre-warm failure.
    pub fn build_checked(self) -> DiResult<Container> {
        let warnings = self.validate().into_result()?;
        for warning in &warnings {
            log::warn!("{}", warning);
        }

        let container = self.build();
        if container.options().eager_singletons {
            let report = container.prewarm();
            if let Some((key, error)) = report.failed.into_iter().next() {
                log::error!("Eager instantiation of {} failed: {}", key, error);
                return Err(error);
            }
        }
        Ok(container)
    }
}
