//! Resolver context for dependency injection.
//!
//! A `ResolverContext` is handed to a registration's constructor. It carries
//! the resolution path of the current top-level call so that nested
//! dependency resolution can detect cycles.

use crate::error::DiResult;
use crate::internal::ResolutionPath;
use crate::key::Key;
use crate::registration::Registration;
use crate::traits::Dependencies;

use super::Container;

pub(crate) struct ResolverContext<'a, 'b> {
    container: &'a Container,
    path: &'b mut ResolutionPath,
    component: Key,
    dependencies: &'a [Key],
}

impl<'a, 'b> ResolverContext<'a, 'b> {
    pub(crate) fn new(
        container: &'a Container,
        path: &'b mut ResolutionPath,
        registration: &'a Registration,
    ) -> Self {
        Self {
            container,
            path,
            component: registration.key,
            dependencies: &registration.dependencies,
        }
    }

    /// Resolves every declared dependency, in declaration order.
    pub(crate) fn resolve_dependencies(&mut self) -> DiResult<Dependencies> {
        let mut entries = Vec::with_capacity(self.dependencies.len());
        for dep in self.dependencies {
            let value = self.container.resolve_in(dep, self.path)?;
            entries.push((*dep, value));
        }
        Ok(Dependencies::new(self.component, entries))
    }
}
