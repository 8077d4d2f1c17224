//! Component scope definitions.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::DiError;

/// Component scopes controlling instance caching behavior
///
/// The scope is mandatory at registration; there is no implicit default.
///
/// # Examples
///
/// ```rust
/// use ferrous_beans::{Component, ComponentCollection, Resolver, Scope};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Config;
/// impl Component for Config {}
///
/// #[derive(Default)]
/// struct Request;
/// impl Component for Request {}
///
/// let mut components = ComponentCollection::new();
/// components.add_singleton::<Config>([]).unwrap();
/// components.add_prototype::<Request>([]).unwrap();
///
/// let container = components.build();
///
/// // Singleton: same instance every time
/// assert!(Arc::ptr_eq(&container.get::<Config>().unwrap(), &container.get::<Config>().unwrap()));
///
/// // Prototype: always a new instance
/// assert!(!Arc::ptr_eq(&container.get::<Request>().unwrap(), &container.get::<Request>().unwrap()));
///
/// assert_eq!("prototype".parse::<Scope>().unwrap(), Scope::Prototype);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Scope {
    /// Single instance per container, created lazily and cached forever
    Singleton,
    /// New instance per resolution, never cached
    ///
    /// Prototype components also get a fresh dependency tree: their
    /// prototype dependencies are constructed again for every instance,
    /// singleton dependencies are shared.
    Prototype,
}

impl Scope {
    /// The canonical lowercase scope name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Singleton => "singleton",
            Scope::Prototype => "prototype",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = DiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "singleton" => Ok(Scope::Singleton),
            "prototype" => Ok(Scope::Prototype),
            _ => Err(DiError::InvalidScope(s.to_string())),
        }
    }
}
