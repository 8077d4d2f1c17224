//! The container: resolves registered components honoring their scope.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::config::ContainerOptions;
use crate::descriptors::ComponentDescriptor;
use crate::error::{DiError, DiResult};
use crate::internal::{with_circular_check, ResolutionPath};
use crate::key::Key;
use crate::observer::Observers;
use crate::registration::{AnyArc, Registration, Registry};
use crate::scope::Scope;
use crate::traits::{Resolver, ResolverCore};
use crate::validation;

pub(crate) mod context;
pub(crate) use context::ResolverContext;

/// Closed registry of component definitions plus the singleton cache.
///
/// Built from a [`ComponentCollection`](crate::ComponentCollection). Cloning is
/// cheap and every clone shares the same singleton instances.
///
/// # Thread Safety
///
/// Each singleton slot is guarded by its own mutex, held while the first
/// instance is constructed, so concurrent first resolutions construct exactly
/// once. Prototype construction takes no lock.
///
/// # Examples
///
/// ```
/// use ferrous_beans::{Component, ComponentCollection, Dependencies, DiResult, Key, Resolver, Scope};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicI32, Ordering};
///
/// #[derive(Default)]
/// struct Counter(AtomicI32);
/// impl Component for Counter {}
///
/// #[derive(Default)]
/// struct Holder { counter: Option<Arc<Counter>> }
/// impl Component for Holder {
///     fn inject(&mut self, deps: &Dependencies) -> DiResult<()> {
///         self.counter = Some(deps.get_type::<Counter>()?);
///         Ok(())
///     }
/// }
///
/// let mut components = ComponentCollection::new();
/// components.add_singleton::<Counter>([]).unwrap();
/// components.add_prototype::<Holder>([Key::of::<Counter>()]).unwrap();
/// let container = components.build();
///
/// let a = container.get::<Holder>().unwrap();
/// let b = container.get::<Holder>().unwrap();
/// a.counter.as_ref().unwrap().0.store(4, Ordering::SeqCst);
/// assert_eq!(b.counter.as_ref().unwrap().0.load(Ordering::SeqCst), 4);
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

pub(crate) struct ContainerInner {
    registry: Registry,
    observers: Observers,
    options: ContainerOptions,
    /// Keys from which a dependency cycle is reachable; they can never resolve
    reaches_cycle: HashSet<Key>,
    /// Singletons stored so far; read without touching the slot locks
    instantiated: AtomicUsize,
}

impl Container {
    pub(crate) fn new(registry: Registry, observers: Observers, options: ContainerOptions) -> Self {
        let analysis = validation::analyze(&registry);
        for error in &analysis.report.errors {
            log::debug!("Registration graph: {}", error);
        }
        for warning in &analysis.report.warnings {
            log::debug!("Registration graph: {}", warning);
        }
        log::debug!("Built container with {} component definitions", registry.len());

        Self {
            inner: Arc::new(ContainerInner {
                registry,
                observers,
                options,
                reaches_cycle: analysis.reaches_cycle,
                instantiated: AtomicUsize::new(0),
            }),
        }
    }

    /// Resolves `key`, returning the type-erased instance.
    ///
    /// Singletons are constructed on first resolution and cached; prototypes
    /// are constructed on every call. Dependencies are resolved recursively
    /// and injected before the instance is returned.
    ///
    /// # Errors
    ///
    /// * [`DiError::UnknownKey`] if `key` (or a dependency) is not registered
    /// * [`DiError::Circular`] if resolution re-enters a key still in progress
    /// * any error returned by a component's `inject`
    pub fn resolve(&self, key: &Key) -> DiResult<AnyArc> {
        let mut path = ResolutionPath::new(self.inner.options.max_depth);
        self.resolve_in(key, &mut path).map_err(|e| {
            log::warn!("Failed to resolve {}: {}", key, e);
            e
        })
    }

    pub(crate) fn resolve_in(&self, key: &Key, path: &mut ResolutionPath) -> DiResult<AnyArc> {
        let observers = &self.inner.observers;
        let start = observers.has_observers().then(|| {
            observers.resolving(key);
            Instant::now()
        });

        let result = match self.inner.registry.get(key) {
            Some(registration) => with_circular_check(path, *key, |path| match registration.scope {
                Scope::Singleton => self.resolve_singleton(registration, path),
                Scope::Prototype => self.construct(registration, path),
            })
            .map(|value| (registration.scope, value)),
            None => Err(DiError::UnknownKey(*key)),
        };

        match result {
            Ok((scope, value)) => {
                if let Some(start) = start {
                    observers.resolved(key, scope, start.elapsed());
                }
                Ok(value)
            }
            Err(e) => {
                observers.failed(key, &e);
                Err(e)
            }
        }
    }

    fn resolve_singleton(&self, registration: &Registration, path: &mut ResolutionPath) -> DiResult<AnyArc> {
        let slot = match &registration.singleton {
            Some(slot) => slot,
            None => return self.construct(registration, path),
        };

        // Construction is bound to fail; skip the slot lock so threads
        // entering the cycle from different keys cannot block each other.
        if self.inner.reaches_cycle.contains(&registration.key) {
            return self.construct(registration, path);
        }

        let mut guard = slot.lock();
        if let Some(value) = guard.as_ref() {
            log::trace!("Singleton cache hit for {} at depth {}", registration.key, path.depth());
            return Ok(value.clone());
        }

        // A failed construction leaves the slot empty for a clean retry
        let value = self.construct(registration, path)?;
        *guard = Some(value.clone());
        self.inner.instantiated.fetch_add(1, Ordering::Release);
        Ok(value)
    }

    fn construct(&self, registration: &Registration, path: &mut ResolutionPath) -> DiResult<AnyArc> {
        let mut ctx = ResolverContext::new(self, path, registration);
        let value = (registration.ctor)(&mut ctx)?;

        log::debug!("Created {} component {}", registration.scope, registration.key);
        self.inner.observers.created(&registration.key, registration.scope);
        Ok(value)
    }

    /// Whether a definition is registered under `key`.
    pub fn contains(&self, key: &Key) -> bool {
        self.inner.registry.contains_key(key)
    }

    /// The declared scope of `key`.
    pub fn scope_of(&self, key: &Key) -> DiResult<Scope> {
        self.inner
            .registry
            .get(key)
            .map(|registration| registration.scope)
            .ok_or(DiError::UnknownKey(*key))
    }

    pub fn is_singleton(&self, key: &Key) -> DiResult<bool> {
        Ok(self.scope_of(key)? == Scope::Singleton)
    }

    pub fn is_prototype(&self, key: &Key) -> DiResult<bool> {
        Ok(self.scope_of(key)? == Scope::Prototype)
    }

    /// Number of singletons instantiated so far.
    ///
    /// Never blocks: a singleton still under construction is not counted.
    pub fn singleton_count(&self) -> usize {
        self.inner.instantiated.load(Ordering::Acquire)
    }

    /// Descriptors of every definition, in registration order.
    pub fn descriptors(&self) -> Vec<ComponentDescriptor> {
        self.inner.registry.iter().map(ComponentDescriptor::from).collect()
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.inner.options
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Container Debug ===\n");
        for registration in self.inner.registry.iter() {
            let deps = registration
                .dependencies
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            s.push_str(&format!(
                "  {} ({}{}) -> [{}]\n",
                registration.key,
                registration.scope,
                if registration.cached().is_some() { ", instantiated" } else { "" },
                deps
            ));
        }
        s
    }
}

impl ResolverCore for Container {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        self.resolve(key)
    }
}

impl Resolver for Container {}
