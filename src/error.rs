//! Error types for the component container.

use thiserror::Error;

use crate::key::Key;

/// Container errors
///
/// Every failure is reported synchronously to the caller of `register`,
/// `resolve`, or `build_checked`. Nothing is retried internally.
///
/// # Examples
///
/// ```rust
/// use ferrous_beans::{ComponentCollection, DiError, Key};
///
/// struct Unregistered;
///
/// let container = ComponentCollection::new().build();
/// match container.resolve(&Key::of::<Unregistered>()) {
///     Err(DiError::UnknownKey(key)) => assert!(key.display_name().ends_with("Unregistered")),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum DiError {
    /// A definition with this key is already registered
    #[error("Component already registered: {0}")]
    DuplicateKey(Key),
    /// No definition is registered for this key
    #[error("Component not found: {0}")]
    UnknownKey(Key),
    /// Resolution re-entered a key that was still in progress (includes path)
    #[error("Circular dependency: {}", join_path(.0))]
    Circular(Vec<Key>),
    /// Downcast to the requested type failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(&'static str),
    /// A component asked for a dependency it never declared
    #[error("Component {component} did not declare a dependency on {dependency}")]
    MissingDependency { component: Key, dependency: Key },
    /// Maximum recursion depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// A scope name that is neither `singleton` nor `prototype`
    #[error("Invalid scope: {0}")]
    InvalidScope(String),
    /// Container options could not be read
    #[error("Configuration error: {0}")]
    Config(String),
    /// The registration graph failed validation
    #[error("Validation failed: {0}")]
    Validation(String),
}

fn join_path(path: &[Key]) -> String {
    path.iter()
        .map(|key| key.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type for container operations
pub type DiResult<T> = Result<T, DiError>;
