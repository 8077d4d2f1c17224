//! Core traits for the component container.

mod component;
mod resolver;

pub use component::{Component, Dependencies};
pub use resolver::{Resolver, ResolverCore};
