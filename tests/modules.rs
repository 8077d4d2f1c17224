/// Tests for the modular component registration system
///
/// Verifies that modules applied through both the consuming and the in-place
/// extension traits register their components and propagate errors.

use ferrous_beans::{
    Component, ComponentCollection, ComponentCollectionExt, ComponentCollectionModuleExt, ComponentModule,
    Dependencies, DiError, DiResult, Key, Resolver,
};
use std::sync::Arc;

// ===== Test Components =====

#[derive(Debug)]
struct Config {
    name: String,
    value: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "test-config".to_string(),
            value: 42,
        }
    }
}

impl Component for Config {}

#[derive(Debug, Default)]
struct DatabaseService {
    config: Option<Arc<Config>>,
}

impl Component for DatabaseService {
    fn inject(&mut self, deps: &Dependencies) -> DiResult<()> {
        self.config = Some(deps.get_type::<Config>()?);
        Ok(())
    }
}

impl DatabaseService {
    fn connection_id(&self) -> String {
        let config = self.config.as_ref().unwrap();
        format!("{}-{}", config.name, config.value)
    }
}

#[derive(Debug, Default)]
struct RequestHandler {
    database: Option<Arc<DatabaseService>>,
}

impl Component for RequestHandler {
    fn inject(&mut self, deps: &Dependencies) -> DiResult<()> {
        self.database = Some(deps.get_type::<DatabaseService>()?);
        Ok(())
    }
}

// ===== Modules =====

struct DatabaseModule;

impl ComponentModule for DatabaseModule {
    fn register_components(self, components: &mut ComponentCollection) -> DiResult<()> {
        components
            .add_singleton::<Config>([])?
            .add_singleton::<DatabaseService>([Key::of::<Config>()])?;
        Ok(())
    }
}

struct HandlerModule;

impl ComponentModule for HandlerModule {
    fn register_components(self, components: &mut ComponentCollection) -> DiResult<()> {
        components.add_prototype::<RequestHandler>([Key::of::<DatabaseService>()])?;
        Ok(())
    }
}

// ===== Tests =====

#[test]
fn test_consuming_module_registration() {
    let container = ComponentCollection::new()
        .add_module(DatabaseModule)
        .unwrap()
        .add_module(HandlerModule)
        .unwrap()
        .build();

    let handler = container.get_required::<RequestHandler>();
    assert_eq!(handler.database.as_ref().unwrap().connection_id(), "test-config-42");
}

#[test]
fn test_in_place_module_registration() {
    let mut sc = ComponentCollection::new();
    sc.add_module_mut(DatabaseModule)
        .unwrap()
        .add_module_mut(HandlerModule)
        .unwrap();
    assert_eq!(sc.len(), 3);

    let container = sc.build();
    let a = container.get_required::<RequestHandler>();
    let b = container.get_required::<RequestHandler>();

    // Prototype handlers share the singleton database
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(a.database.as_ref().unwrap(), b.database.as_ref().unwrap()));
}

#[test]
fn test_module_mixed_with_direct_registration() {
    let mut sc = ComponentCollection::new();
    sc.add_singleton_factory(
        || Config {
            name: "custom".to_string(),
            value: 7,
        },
        [],
    )
    .unwrap()
    .add_singleton::<DatabaseService>([Key::of::<Config>()])
    .unwrap();
    sc.add_module_mut(HandlerModule).unwrap();

    let container = sc.build();
    let handler = container.get_required::<RequestHandler>();
    assert_eq!(handler.database.as_ref().unwrap().connection_id(), "custom-7");
}

#[test]
fn test_module_registration_error_propagation() {
    let mut sc = ComponentCollection::new();
    sc.add_singleton::<Config>([]).unwrap();

    let result = sc.add_module(DatabaseModule);
    assert!(matches!(result, Err(DiError::DuplicateKey(key)) if key == Key::of::<Config>()));
}

#[test]
fn test_modules_compose_in_any_order() {
    // Dependencies are resolved lazily, so registration order does not matter
    let container = ComponentCollection::new()
        .add_module(HandlerModule)
        .unwrap()
        .add_module(DatabaseModule)
        .unwrap()
        .build_checked()
        .unwrap();

    assert!(container.get::<RequestHandler>().is_ok());
}

#[test]
fn test_empty_module() {
    struct EmptyModule;

    impl ComponentModule for EmptyModule {
        fn register_components(self, _components: &mut ComponentCollection) -> DiResult<()> {
            Ok(())
        }
    }

    let sc = ComponentCollection::new().add_module(EmptyModule).unwrap();
    assert!(sc.is_empty());
}
