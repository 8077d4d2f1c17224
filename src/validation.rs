//! Build-time validation of the registration graph.
//!
//! The registry is closed once the container is built and every component
//! declares its dependency keys up front, so unknown dependencies and cycles
//! can be found without constructing anything. Validation is advisory: the
//! container reports the same conditions at resolution time regardless.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::DiError;
use crate::key::Key;
use crate::registration::Registry;
use crate::scope::Scope;

/// Errors that make at least one component impossible to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `component` declares a dependency on a key nobody registered
    MissingDependency { component: Key, dependency: Key },
    /// Declared dependencies form a cycle; the first key is repeated last
    Circular { path: Vec<Key> },
}

/// Configurations that resolve but are likely surprising.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// A singleton holds a prototype: that one prototype instance lives as
    /// long as the singleton and is shared by everyone who sees it.
    PrototypeInSingleton { singleton: Key, prototype: Key },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingDependency { component, dependency } => {
                write!(f, "{} depends on unregistered {}", component, dependency)
            }
            ValidationError::Circular { path } => {
                let joined = path.iter().map(|k| k.to_string()).collect::<Vec<_>>().join(" -> ");
                write!(f, "dependency cycle {}", joined)
            }
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::PrototypeInSingleton { singleton, prototype } => {
                write!(f, "singleton {} captures prototype {}", singleton, prototype)
            }
        }
    }
}

/// Result of validating a component collection.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first error as a `DiError`, for callers that want to fail fast.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, DiError> {
        match self.errors.first() {
            Some(error) => Err(DiError::Validation(error.to_string())),
            None => Ok(self.warnings),
        }
    }
}

/// Report plus the keys that can never resolve because a cycle is reachable.
pub(crate) struct GraphAnalysis {
    pub(crate) report: ValidationReport,
    pub(crate) reaches_cycle: HashSet<Key>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

struct GraphWalk<'r> {
    registry: &'r Registry,
    state: HashMap<Key, Visit>,
    stack: Vec<Key>,
    reaches_cycle: HashSet<Key>,
    cycles: Vec<Vec<Key>>,
}

impl<'r> GraphWalk<'r> {
    /// Depth-first visit; returns whether a cycle is reachable from `key`.
    fn visit(&mut self, key: Key) -> bool {
        if self.state.get(&key) == Some(&Visit::Done) {
            return self.reaches_cycle.contains(&key);
        }

        self.state.insert(key, Visit::InProgress);
        self.stack.push(key);

        let mut found = false;
        if let Some(registration) = self.registry.get(&key) {
            for dep in &registration.dependencies {
                if self.state.get(dep) == Some(&Visit::InProgress) {
                    if let Some(start) = self.stack.iter().position(|k| k == dep) {
                        let mut cycle = self.stack[start..].to_vec();
                        cycle.push(*dep);
                        self.cycles.push(cycle);
                    }
                    found = true;
                } else if self.visit(*dep) {
                    found = true;
                }
            }
        }

        self.stack.pop();
        self.state.insert(key, Visit::Done);
        if found {
            self.reaches_cycle.insert(key);
        }
        found
    }
}

pub(crate) fn analyze(registry: &Registry) -> GraphAnalysis {
    let mut report = ValidationReport::default();

    for registration in registry.iter() {
        for dep in &registration.dependencies {
            match registry.get(dep) {
                None => report.errors.push(ValidationError::MissingDependency {
                    component: registration.key,
                    dependency: *dep,
                }),
                Some(target) => {
                    if registration.scope == Scope::Singleton && target.scope == Scope::Prototype {
                        report.warnings.push(ValidationWarning::PrototypeInSingleton {
                            singleton: registration.key,
                            prototype: *dep,
                        });
                    }
                }
            }
        }
    }

    let mut walk = GraphWalk {
        registry,
        state: HashMap::new(),
        stack: Vec::new(),
        reaches_cycle: HashSet::new(),
        cycles: Vec::new(),
    };
    for registration in registry.iter() {
        walk.visit(registration.key);
    }

    report
        .errors
        .extend(walk.cycles.into_iter().map(|path| ValidationError::Circular { path }));

    GraphAnalysis {
        report,
        reaches_cycle: walk.reaches_cycle,
    }
}
