//! Component registration types.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::provider::ResolverContext;
use crate::scope::Scope;

/// Type-erased shared instance, as returned by untyped resolution.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Builds one fully-wired instance: factory, then dependency injection.
pub(crate) type Ctor = Arc<dyn for<'a, 'b> Fn(&mut ResolverContext<'a, 'b>) -> DiResult<AnyArc> + Send + Sync>;

/// Component definition with scope, constructor, and declared dependencies
pub(crate) struct Registration {
    pub(crate) key: Key,
    pub(crate) scope: Scope,
    pub(crate) ctor: Ctor,
    pub(crate) dependencies: Vec<Key>,
    /// Implementation type name for diagnostics
    pub(crate) impl_type_name: &'static str,
    /// Singleton slot, held locked for the duration of the first construction
    pub(crate) singleton: Option<Mutex<Option<AnyArc>>>,
}

impl Registration {
    pub(crate) fn new(
        key: Key,
        scope: Scope,
        ctor: Ctor,
        dependencies: Vec<Key>,
        impl_type_name: &'static str,
    ) -> Self {
        let singleton = match scope {
            Scope::Singleton => Some(Mutex::new(None)),
            Scope::Prototype => None,
        };

        Self {
            key,
            scope,
            ctor,
            dependencies,
            impl_type_name,
            singleton,
        }
    }

    /// The cached singleton, if one has been constructed.
    #[cfg(any(test, feature = "diagnostics"))]
    pub(crate) fn cached(&self) -> Option<AnyArc> {
        self.singleton.as_ref().and_then(|slot| slot.lock().clone())
    }
}

/// Component registry holding all definitions in registration order
pub(crate) struct Registry {
    entries: Vec<Registration>,
    index: HashMap<Key, usize>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds a definition, refusing to replace an existing one.
    pub(crate) fn insert(&mut self, registration: Registration) -> DiResult<()> {
        let key = registration.key;
        if self.index.contains_key(&key) {
            return Err(DiError::DuplicateKey(key));
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(registration);
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn get(&self, key: &Key) -> Option<&Registration> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    #[inline(always)]
    pub(crate) fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
