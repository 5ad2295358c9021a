use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use truss_ioc::{Container, Inject, RegisterError, ResolveError, Resolver, ServiceKey};

// --- Test fixtures ---

trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello!".to_string()
  }
}

#[derive(Debug, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}

impl Inject for SimpleService {
  fn inject(_: &Container) -> Result<Self, ResolveError> {
    Ok(SimpleService { id: 7 })
  }
}

// --- Basic tests ---

#[test]
fn transient_resolution_builds_distinct_instances() {
  let ioc = Container::new();
  ioc.register::<SimpleService>().unwrap();

  let r1 = ioc.resolve::<SimpleService>().unwrap();
  let r2 = ioc.resolve::<SimpleService>().unwrap();

  assert_eq!(r1.id, 7);
  assert_eq!(r2.id, 7);
  assert!(!Arc::ptr_eq(&r1, &r2));
}

#[test]
fn single_instance_resolution_builds_once_and_shares() {
  let ioc = Container::new();
  let built = Arc::new(AtomicUsize::new(0));

  let counter = Arc::clone(&built);
  ioc
    .register_resolver(Resolver::single_instance(move |_| {
      counter.fetch_add(1, Ordering::SeqCst);
      Ok(SimpleService { id: 42 })
    }))
    .unwrap();

  let r1 = ioc.resolve::<SimpleService>().unwrap();
  let r2 = ioc.resolve::<SimpleService>().unwrap();
  let r3 = ioc.resolve::<SimpleService>().unwrap();

  assert!(Arc::ptr_eq(&r1, &r2));
  assert!(Arc::ptr_eq(&r2, &r3));
  assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn instance_resolution_always_returns_the_same_value() {
  let ioc = Container::new();
  ioc.register_instance(SimpleService { id: 9 }).unwrap();

  let r1 = ioc.resolve::<SimpleService>().unwrap();
  let r2 = ioc.resolve::<SimpleService>().unwrap();

  assert_eq!(r1.id, 9);
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn trait_instance_resolution_returns_the_registered_arc() {
  let ioc = Container::new();
  let original: Arc<dyn Greeter> = Arc::new(EnglishGreeter);
  ioc
    .register_instance_trait::<dyn Greeter>(Arc::clone(&original))
    .unwrap();

  let resolved = ioc.resolve::<dyn Greeter>().unwrap();
  assert!(Arc::ptr_eq(&original, &resolved));
}

#[test]
fn factory_runs_once_per_resolution() {
  let ioc = Container::new();
  let calls = Arc::new(AtomicUsize::new(0));

  let counter = Arc::clone(&calls);
  ioc
    .register_factory(move || {
      counter.fetch_add(1, Ordering::SeqCst);
      SimpleService { id: 1 }
    })
    .unwrap();

  let r1 = ioc.resolve::<SimpleService>().unwrap();
  let r2 = ioc.resolve::<SimpleService>().unwrap();

  assert_eq!(calls.load(Ordering::SeqCst), 2);
  assert!(!Arc::ptr_eq(&r1, &r2));
}

#[test]
fn trait_registration_resolves_an_implementation() {
  let ioc = Container::new();
  ioc
    .register_trait::<dyn Greeter>(|_| Ok(Arc::new(EnglishGreeter)))
    .unwrap();

  let greeter = ioc.resolve::<dyn Greeter>().unwrap();
  assert_eq!(greeter.greet(), "Hello!");
}

// --- Error paths ---

#[test]
fn duplicate_registration_is_rejected_and_the_first_stays_intact() {
  let ioc = Container::new();
  ioc.register_instance(SimpleService { id: 1 }).unwrap();

  // Every register variant hits the same key check.
  let err = ioc.register::<SimpleService>().unwrap_err();
  assert_eq!(
    err,
    RegisterError::AlreadyRegistered(ServiceKey::of::<SimpleService>())
  );
  let err = ioc.register_factory(|| SimpleService { id: 3 }).unwrap_err();
  assert!(matches!(err, RegisterError::AlreadyRegistered(_)));

  // The original registration still resolves.
  assert_eq!(ioc.resolve::<SimpleService>().unwrap().id, 1);
}

#[test]
fn resolving_an_unregistered_service_fails() {
  #[derive(Debug)]
  struct Missing;
  let ioc = Container::new();

  let err = ioc.resolve::<Missing>().unwrap_err();
  assert_eq!(err, ResolveError::NotRegistered(ServiceKey::of::<Missing>()));
}

#[test]
fn errors_name_the_offending_type() {
  let ioc = Container::new();
  ioc.register_instance(SimpleService { id: 1 }).unwrap();

  let err = ioc.register_instance(SimpleService { id: 2 }).unwrap_err();
  assert!(err.to_string().contains("SimpleService"));
  assert!(err.to_string().ends_with("is already registered"));

  #[derive(Debug)]
  struct Missing;
  let err = ioc.resolve::<Missing>().unwrap_err();
  assert!(err.to_string().contains("Missing"));
  assert!(err.to_string().ends_with("it is not registered"));
}
