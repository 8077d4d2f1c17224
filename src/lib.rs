//! # ferrous-beans
//!
//! A minimal dependency injection container with singleton and prototype
//! component scopes.
//!
//! ## Features
//!
//! - **Explicit scopes**: every registration declares `Singleton` or `Prototype`
//! - **Declared dependencies**: components list the keys they need; the
//!   container resolves them and injects them through [`Component::inject`]
//! - **Lazy singletons**: created once on first resolution, shared afterwards
//! - **Fresh prototypes**: a new instance, with a fresh prototype dependency
//!   tree, on every resolution
//! - **Circular dependency detection**: fails with the full key path instead
//!   of recursing forever
//! - **Thread-safe**: concurrent first resolutions of a singleton construct it
//!   exactly once
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_beans::{Component, ComponentCollection, Dependencies, DiResult, Key, Resolver};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicI32, Ordering};
//!
//! #[derive(Default)]
//! struct Counter {
//!     value: AtomicI32,
//! }
//! impl Component for Counter {}
//!
//! #[derive(Default)]
//! struct Composite {
//!     shared: Option<Arc<Counter>>,
//!     own: Option<Arc<Counter>>,
//! }
//!
//! impl Component for Composite {
//!     fn inject(&mut self, deps: &Dependencies) -> DiResult<()> {
//!         self.shared = Some(deps.get_named::<Counter>("shared")?);
//!         self.own = Some(deps.get_named::<Counter>("own")?);
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> DiResult<()> {
//! let mut components = ComponentCollection::new();
//! components
//!     .add_named_singleton::<Counter>("shared", [])?
//!     .add_named_prototype::<Counter>("own", [])?
//!     .add_prototype::<Composite>([Key::named::<Counter>("shared"), Key::named::<Counter>("own")])?;
//!
//! let container = components.build();
//! let a = container.get::<Composite>()?;
//! let b = container.get::<Composite>()?;
//!
//! a.shared.as_ref().unwrap().value.store(4, Ordering::SeqCst);
//! a.own.as_ref().unwrap().value.store(1, Ordering::SeqCst);
//!
//! assert_eq!(b.shared.as_ref().unwrap().value.load(Ordering::SeqCst), 4);
//! assert_eq!(b.own.as_ref().unwrap().value.load(Ordering::SeqCst), 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Scopes
//!
//! - **Singleton**: one instance per container, created on first resolution
//! - **Prototype**: a new instance on every resolution

// Module declarations
pub mod collection;
pub mod config;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod observer;
pub mod prewarm;
pub mod provider;
pub mod scope;
pub mod traits;
pub mod validation;

// Internal modules
mod internal;
mod registration;

// Re-export core types
pub use collection::{ComponentCollection, ComponentModule, ComponentCollectionExt, ComponentCollectionModuleExt};
pub use config::ContainerOptions;
pub use descriptors::ComponentDescriptor;
pub use error::{DiError, DiResult};
pub use key::{Key, key_of_type};
pub use observer::{ResolutionObserver, LoggingObserver, MetricsObserver};
pub use prewarm::PrewarmReport;
pub use provider::Container;
pub use registration::AnyArc;
pub use scope::Scope;
pub use traits::{Component, Dependencies, Resolver, ResolverCore};
pub use validation::{ValidationReport, ValidationError, ValidationWarning};
