/// Container options and eager singleton instantiation
///
/// Environment-driven tests mutate process state and run serially.

use ferrous_beans::config::{ENV_EAGER_SINGLETONS, ENV_MAX_DEPTH};
use ferrous_beans::{Component, ComponentCollection, ContainerOptions, Dependencies, DiError, DiResult, Key};
use serial_test::serial;
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Cache;
impl Component for Cache {}

#[derive(Default)]
struct Session;
impl Component for Session {}

#[derive(Default)]
struct Broken;

impl Component for Broken {
    fn inject(&mut self, _deps: &Dependencies) -> DiResult<()> {
        Err(DiError::Config("broken on purpose".to_string()))
    }
}

fn clear_env() {
    env::remove_var(ENV_MAX_DEPTH);
    env::remove_var(ENV_EAGER_SINGLETONS);
}

// ===== Options from the environment =====

#[test]
#[serial]
fn test_from_env_defaults_when_unset() {
    clear_env();
    assert_eq!(ContainerOptions::from_env().unwrap(), ContainerOptions::default());
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    clear_env();
    env::set_var(ENV_MAX_DEPTH, " 16 ");
    env::set_var(ENV_EAGER_SINGLETONS, "yes");

    let options = ContainerOptions::from_env().unwrap();
    clear_env();

    assert_eq!(options.max_depth, 16);
    assert!(options.eager_singletons);
}

#[test]
#[serial]
fn test_from_env_rejects_invalid_values() {
    clear_env();
    env::set_var(ENV_MAX_DEPTH, "deep");
    let bad_depth = ContainerOptions::from_env();
    clear_env();

    env::set_var(ENV_EAGER_SINGLETONS, "sometimes");
    let bad_flag = ContainerOptions::from_env();
    clear_env();

    env::set_var(ENV_MAX_DEPTH, "0");
    let zero_depth = ContainerOptions::from_env();
    clear_env();

    assert!(matches!(bad_depth, Err(DiError::Config(msg)) if msg.contains(ENV_MAX_DEPTH)));
    assert!(matches!(bad_flag, Err(DiError::Config(msg)) if msg.contains(ENV_EAGER_SINGLETONS)));
    assert!(matches!(zero_depth, Err(DiError::Config(_))));
}

// ===== Pre-warming =====

#[test]
fn test_prewarm_instantiates_singletons_only() {
    let sessions = Arc::new(AtomicUsize::new(0));
    let sessions_clone = sessions.clone();

    let mut sc = ComponentCollection::new();
    sc.add_singleton::<Cache>([]).unwrap();
    sc.add_prototype_factory(
        move || {
            sessions_clone.fetch_add(1, Ordering::SeqCst);
            Session
        },
        [],
    )
    .unwrap();
    let container = sc.build();

    let report = container.prewarm();
    assert!(report.is_success());
    assert_eq!(report.ready, vec![Key::of::<Cache>()]);
    assert_eq!(container.singleton_count(), 1);
    assert_eq!(sessions.load(Ordering::SeqCst), 0);
}

#[test]
fn test_prewarm_reports_failures_and_continues() {
    let mut sc = ComponentCollection::new();
    sc.add_singleton::<Broken>([]).unwrap();
    sc.add_singleton::<Cache>([]).unwrap();
    let container = sc.build();

    let report = container.prewarm();
    assert!(!report.is_success());
    assert_eq!(report.ready, vec![Key::of::<Cache>()]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, Key::of::<Broken>());
    assert!(matches!(report.failed[0].1, DiError::Config(_)));
}

#[test]
fn test_build_checked_eager_instantiates() {
    let mut sc = ComponentCollection::new();
    sc.add_singleton::<Cache>([]).unwrap();
    sc.with_options(ContainerOptions::default().with_eager_singletons(true));

    let container = sc.build_checked().unwrap();
    assert_eq!(container.singleton_count(), 1);
}

#[test]
fn test_build_checked_lazy_by_default() {
    let mut sc = ComponentCollection::new();
    sc.add_singleton::<Cache>([]).unwrap();

    let container = sc.build_checked().unwrap();
    assert_eq!(container.singleton_count(), 0);
}

#[test]
fn test_build_checked_eager_failure() {
    let mut sc = ComponentCollection::new();
    sc.add_singleton::<Broken>([]).unwrap();
    sc.with_options(ContainerOptions::default().with_eager_singletons(true));

    assert!(matches!(sc.build_checked(), Err(DiError::Config(_))));
}

#[test]
fn test_build_checked_rejects_missing_dependency() {
    let mut sc = ComponentCollection::new();
    sc.add_singleton::<Cache>([Key::of::<Session>()]).unwrap();

    match sc.build_checked() {
        Err(DiError::Validation(msg)) => assert!(msg.contains("Session")),
        other => panic!("Expected Validation error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_build_checked_allows_prototype_in_singleton() {
    let mut sc = ComponentCollection::new();
    sc.add_prototype::<Session>([]).unwrap();
    sc.add_singleton::<Cache>([Key::of::<Session>()]).unwrap();

    let report = sc.validate();
    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 1);
    assert!(sc.build_checked().is_ok());
}

#[cfg(feature = "config")]
#[test]
fn test_options_from_json_drive_build() {
    let options = ContainerOptions::from_json_str(r#"{ "max_depth": 8, "eager_singletons": true }"#).unwrap();

    let mut sc = ComponentCollection::new();
    sc.add_singleton::<Cache>([]).unwrap();
    sc.with_options(options);

    let container = sc.build_checked().unwrap();
    assert_eq!(container.options().max_depth, 8);
    assert_eq!(container.singleton_count(), 1);
}
