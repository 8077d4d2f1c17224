//! Container options and the sources they can be loaded from.
//!
//! Options can come from code (`Default` plus builder methods), from the
//! process environment, or, with the `config` feature, from JSON.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{DiError, DiResult};
use crate::internal::MAX_DEPTH;

/// Environment variable overriding [`ContainerOptions::max_depth`].
pub const ENV_MAX_DEPTH: &str = "FERROUS_BEANS_MAX_DEPTH";
/// Environment variable overriding [`ContainerOptions::eager_singletons`].
pub const ENV_EAGER_SINGLETONS: &str = "FERROUS_BEANS_EAGER_SINGLETONS";

/// Tunables applied when a container is built.
///
/// # Examples
///
/// ```
/// use ferrous_beans::{ComponentCollection, ContainerOptions};
///
/// let options = ContainerOptions::default().with_eager_singletons(true);
///
/// let mut components = ComponentCollection::new();
/// components.with_options(options);
/// let container = components.build_checked().unwrap();
/// assert_eq!(container.options().eager_singletons, true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct ContainerOptions {
    /// Maximum nesting of dependency resolution per top-level call.
    ///
    /// Each level recurses on the calling thread's stack. The default of 256
    /// fits the 2 MiB stack of spawned threads in debug builds; raise it only
    /// for threads with a larger stack.
    pub max_depth: usize,
    /// Instantiate every singleton in `build_checked()` instead of on first use
    pub eager_singletons: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            eager_singletons: false,
        }
    }
}

impl ContainerOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_eager_singletons(mut self, eager: bool) -> Self {
        self.eager_singletons = eager;
        self
    }

    /// Defaults overridden by any `FERROUS_BEANS_*` environment variables.
    pub fn from_env() -> DiResult<Self> {
        let mut options = Self::default();

        if let Ok(raw) = env::var(ENV_MAX_DEPTH) {
            options.max_depth = raw.trim().parse::<usize>().map_err(|e| {
                DiError::Config(format!("{}={:?}: {}", ENV_MAX_DEPTH, raw, e))
            })?;
        }

        if let Ok(raw) = env::var(ENV_EAGER_SINGLETONS) {
            options.eager_singletons = parse_bool(&raw).ok_or_else(|| {
                DiError::Config(format!("{}={:?}: expected a boolean", ENV_EAGER_SINGLETONS, raw))
            })?;
        }

        options.check()?;
        log::debug!("Loaded container options from environment: {:?}", options);
        Ok(options)
    }

    /// Parses options from a JSON object; missing fields keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_json_str(json: &str) -> DiResult<Self> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| DiError::Config(format!("invalid container options: {}", e)))?;
        options.check()?;
        Ok(options)
    }

    fn check(&self) -> DiResult<()> {
        if self.max_depth == 0 {
            return Err(DiError::Config("max_depth must be > 0".to_string()));
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lazy() {
        let options = ContainerOptions::default();
        assert_eq!(options.max_depth, MAX_DEPTH);
        assert!(!options.eager_singletons);
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" on "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let options = ContainerOptions::default().with_max_depth(0);
        assert!(matches!(options.check(), Err(DiError::Config(_))));
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let options = ContainerOptions::from_json_str(r#"{ "eager_singletons": true }"#).unwrap();
        assert!(options.eager_singletons);
        assert_eq!(options.max_depth, MAX_DEPTH);

        assert!(ContainerOptions::from_json_str(r#"{ "max_depth": 0 }"#).is_err());
        assert!(ContainerOptions::from_json_str(r#"{ "lazy": true }"#).is_err());
    }
}
