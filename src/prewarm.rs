//! Eager singleton instantiation.
//!
//! Singletons are lazy by default. Pre-warming resolves every singleton up
//! front, the way a managed application context instantiates its non-lazy
//! singletons at startup, and reports which ones failed.

use std::time::{Duration, Instant};

use crate::error::DiError;
use crate::key::Key;
use crate::provider::Container;
use crate::scope::Scope;

/// Outcome of pre-warming a container.
#[derive(Debug, Default)]
pub struct PrewarmReport {
    /// Singletons that are now instantiated
    pub ready: Vec<Key>,
    /// Singletons that failed, with the error from their resolution
    pub failed: Vec<(Key, DiError)>,
    pub elapsed: Duration,
}

impl PrewarmReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Container {
    /// Instantiates every singleton, in registration order.
    ///
    /// Singletons that are already cached count as ready. Failures do not
    /// stop the remaining singletons from being attempted.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_beans::{Component, ComponentCollection};
    ///
    /// #[derive(Default)]
    /// struct Cache;
    /// impl Component for Cache {}
    ///
    /// let mut components = ComponentCollection::new();
    /// components.add_singleton::<Cache>([]).unwrap();
    /// let container = components.build();
    ///
    /// assert_eq!(container.singleton_count(), 0);
    /// let report = container.prewarm();
    /// assert!(report.is_success());
    /// assert_eq!(container.singleton_count(), 1);
    /// ```
    pub fn prewarm(&self) -> PrewarmReport {
        let start = Instant::now();
        let mut report = PrewarmReport::default();

        let singletons: Vec<Key> = self
            .registry()
            .iter()
            .filter(|registration| registration.scope == Scope::Singleton)
            .map(|registration| registration.key)
            .collect();

        for key in singletons {
            match self.resolve(&key) {
                Ok(_) => report.ready.push(key),
                Err(e) => report.failed.push((key, e)),
            }
        }

        report.elapsed = start.elapsed();
        log::info!(
            "Pre-warmed {} singletons ({} failed) in {:?}",
            report.ready.len(),
            report.failed.len(),
            report.elapsed
        );
        report
    }
}
