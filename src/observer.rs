//! Diagnostic observers for component resolution.
//!
//! Observers receive a callback for every resolution the container performs,
//! including nested dependency resolutions. They are registered on the
//! [`ComponentCollection`](crate::ComponentCollection) before the container is
//! built.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::key::Key;
use crate::scope::Scope;

/// Observer for component resolution events.
///
/// # Examples
///
/// ```
/// use ferrous_beans::{ComponentCollection, ResolutionObserver, Key, Scope};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// #[derive(Default)]
/// struct CreationCounter(AtomicUsize);
///
/// impl ResolutionObserver for CreationCounter {
///     fn created(&self, _key: &Key, _scope: Scope) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
///
/// let counter = Arc::new(CreationCounter::default());
/// let mut components = ComponentCollection::new();
/// components.add_observer(counter.clone());
/// ```
pub trait ResolutionObserver: Send + Sync {
    /// Called when resolution of `key` starts, before any cache lookup.
    fn resolving(&self, key: &Key) {
        let _ = key;
    }

    /// Called when resolution of `key` completed successfully.
    fn resolved(&self, key: &Key, scope: Scope, duration: Duration) {
        let _ = (key, scope, duration);
    }

    /// Called when a new instance was constructed and wired.
    ///
    /// For singletons this runs while the slot lock is still held, before the
    /// instance is cached. Resolving the same key from inside the callback
    /// deadlocks; `Container::singleton_count` is safe to call.
    fn created(&self, key: &Key, scope: Scope) {
        let _ = (key, scope);
    }

    /// Called when resolution of `key` failed.
    fn failed(&self, key: &Key, error: &DiError) {
        let _ = (key, error);
    }
}

/// Collection of observers held by the container.
#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn ResolutionObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self { observers: Vec::new() }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn ResolutionObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn resolving(&self, key: &Key) {
        for observer in &self.observers {
            observer.resolving(key);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, key: &Key, scope: Scope, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, scope, duration);
        }
    }

    #[inline]
    pub(crate) fn created(&self, key: &Key, scope: Scope) {
        for observer in &self.observers {
            observer.created(key, scope);
        }
    }

    #[inline]
    pub(crate) fn failed(&self, key: &Key, error: &DiError) {
        for observer in &self.observers {
            observer.failed(key, error);
        }
    }
}

/// Observer that forwards resolution events to the `log` facade.
///
/// Resolutions are logged at `debug`, constructions at `info`, failures at
/// `warn`, all under the configured target.
///
/// # Examples
///
/// ```
/// use ferrous_beans::{ComponentCollection, LoggingObserver};
/// use std::sync::Arc;
///
/// let mut components = ComponentCollection::new();
/// components.add_observer(Arc::new(LoggingObserver::new()));
/// ```
pub struct LoggingObserver {
    target: &'static str,
}

impl LoggingObserver {
    /// Creates a logging observer with the default `ferrous_beans` target.
    pub fn new() -> Self {
        Self { target: "ferrous_beans" }
    }

    /// Creates a logging observer with a custom log target.
    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionObserver for LoggingObserver {
    fn resolving(&self, key: &Key) {
        log::trace!(target: self.target, "Resolving: {}", key);
    }

    fn resolved(&self, key: &Key, scope: Scope, duration: Duration) {
        log::debug!(target: self.target, "Resolved {} component {} in {:?}", scope, key, duration);
    }

    fn created(&self, key: &Key, scope: Scope) {
        log::info!(target: self.target, "Created {} component {}", scope, key);
    }

    fn failed(&self, key: &Key, error: &DiError) {
        log::warn!(target: self.target, "Failed to resolve {}: {}", key, error);
    }
}

/// Metrics-collecting observer with atomic counters.
#[derive(Default)]
pub struct MetricsObserver {
    resolution_count: AtomicU64,
    total_resolution_time: AtomicU64,
    singletons_created: AtomicU64,
    prototypes_created: AtomicU64,
    failure_count: AtomicU64,
}

impl MetricsObserver {
    /// Creates a new metrics observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of successful resolutions observed, nested ones included.
    pub fn resolution_count(&self) -> u64 {
        self.resolution_count.load(Ordering::Relaxed)
    }

    /// Gets the average resolution time.
    pub fn average_resolution_time(&self) -> Option<Duration> {
        let count = self.resolution_count();
        if count == 0 {
            return None;
        }

        let total_ns = self.total_resolution_time.load(Ordering::Relaxed);
        Some(Duration::from_nanos(total_ns / count))
    }

    /// Number of singleton instances constructed.
    pub fn singletons_created(&self) -> u64 {
        self.singletons_created.load(Ordering::Relaxed)
    }

    /// Number of prototype instances constructed.
    pub fn prototypes_created(&self) -> u64 {
        self.prototypes_created.load(Ordering::Relaxed)
    }

    /// Number of failed resolutions observed.
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Resets all metrics.
    pub fn reset(&self) {
        self.resolution_count.store(0, Ordering::Relaxed);
        self.total_resolution_time.store(0, Ordering::Relaxed);
        self.singletons_created.store(0, Ordering::Relaxed);
        self.prototypes_created.store(0, Ordering::Relaxed);
        self.failure_count.store(0, Ordering::Relaxed);
    }
}

impl ResolutionObserver for MetricsObserver {
    fn resolved(&self, _key: &Key, _scope: Scope, duration: Duration) {
        self.resolution_count.fetch_add(1, Ordering::Relaxed);
        self.total_resolution_time.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    fn created(&self, _key: &Key, scope: Scope) {
        match scope {
            Scope::Singleton => self.singletons_created.fetch_add(1, Ordering::Relaxed),
            Scope::Prototype => self.prototypes_created.fetch_add(1, Ordering::Relaxed),
        };
    }

    fn failed(&self, _key: &Key, _error: &DiError) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }
}
