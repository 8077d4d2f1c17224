//! Shows how singleton and prototype components behave when two composite
//! components share a container.
//!
//! Both composites receive the same four singleton counters and their own
//! three prototype counters. Writing through one composite is visible through
//! the other for the singletons only.
//!
//! Run with `cargo run --features demo --bin bean-scopes`.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use ferrous_beans::{
    Component, ComponentCollection, ComponentCollectionExt, ComponentModule, Dependencies, DiResult, Key,
    LoggingObserver, Resolver, Scope,
};

const SINGLETONS: [&str; 4] = ["singleton1", "singleton2", "singleton3", "singleton4"];
const PROTOTYPES: [&str; 3] = ["prototype1", "prototype2", "prototype3"];

#[derive(Default)]
struct Counter {
    value: AtomicI32,
}

impl Component for Counter {}

impl Counter {
    fn get(&self) -> i32 {
        self.value.load(Ordering::SeqCst)
    }

    fn set(&self, value: i32) {
        self.value.store(value, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct Composite {
    counters: Vec<(&'static str, Arc<Counter>)>,
}

impl Component for Composite {
    fn inject(&mut self, deps: &Dependencies) -> DiResult<()> {
        for name in SINGLETONS.iter().chain(PROTOTYPES.iter()).copied() {
            self.counters.push((name, deps.get_named::<Counter>(name)?));
        }
        Ok(())
    }
}

impl Composite {
    fn set_value(&self, value: i32) {
        for (_, counter) in &self.counters {
            counter.set(value);
        }
    }

    fn print_values(&self, label: &str) {
        let values = self
            .counters
            .iter()
            .map(|(name, counter)| format!("{}={}", name, counter.get()))
            .collect::<Vec<_>>()
            .join(" ");
        log::info!("{}: {}", label, values);
    }
}

fn counter_keys() -> Vec<Key> {
    SINGLETONS
        .iter()
        .chain(PROTOTYPES.iter())
        .map(|name| Key::named::<Counter>(*name))
        .collect()
}

struct ScopeDemoModule;

impl ComponentModule for ScopeDemoModule {
    fn register_components(self, components: &mut ComponentCollection) -> DiResult<()> {
        for name in SINGLETONS {
            components.add_named_singleton::<Counter>(name, [])?;
        }
        for name in PROTOTYPES {
            // Scope names as they would appear in configuration
            let scope = "prototype".parse::<Scope>()?;
            components.register(Key::named::<Counter>(name), scope, Counter::default, [])?;
        }
        components
            .add_named_singleton::<Composite>("first", counter_keys())?
            .add_named_singleton::<Composite>("second", counter_keys())?;
        Ok(())
    }
}

fn main() -> DiResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut components = ComponentCollection::new().add_module(ScopeDemoModule)?;
    components.add_observer(Arc::new(LoggingObserver::new()));
    let container = components.build_checked()?;

    let first = container.get_named::<Composite>("first")?;
    let second = container.get_named::<Composite>("second")?;

    first.set_value(1);
    second.set_value(2);
    // Singletons read 2 everywhere; first's prototypes still read 1
    first.print_values("first");
    second.print_values("second");

    first.set_value(4);
    // Singletons read 4 everywhere; second's prototypes still read 2
    second.print_values("second");
    first.print_values("first");

    Ok(())
}
