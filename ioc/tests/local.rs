use std::cell::Cell;
use std::rc::Rc;
use truss_ioc::{Inject, LocalContainer, LocalLazy, RegisterError, ResolveError};

struct SimpleService {
  id: u32,
}

impl Inject<LocalContainer> for SimpleService {
  fn inject(_: &LocalContainer) -> Result<Self, ResolveError> {
    Ok(SimpleService { id: 5 })
  }
}

#[test]
fn local_single_instance_is_shared() {
  let ioc = LocalContainer::new();
  ioc.register_single_instance::<SimpleService>().unwrap();

  let r1 = ioc.resolve::<SimpleService>().unwrap();
  let r2 = ioc.resolve::<SimpleService>().unwrap();

  assert_eq!(r1.id, 5);
  assert!(Rc::ptr_eq(&r1, &r2));
}

#[test]
fn local_transients_are_distinct() {
  let ioc = LocalContainer::new();
  // A Cell shows that the two resolutions are independent instances.
  ioc.register_factory(|| Cell::new(10)).unwrap();

  let r1 = ioc.resolve::<Cell<i32>>().unwrap();
  let r2 = ioc.resolve::<Cell<i32>>().unwrap();

  r1.set(20);
  assert_eq!(r1.get(), 20);
  assert_eq!(r2.get(), 10);
  assert!(!Rc::ptr_eq(&r1, &r2));
}

#[test]
fn local_trait_resolution() {
  trait Greeter {
    fn greet(&self) -> String;
  }
  struct English;
  impl Greeter for English {
    fn greet(&self) -> String {
      "Hello".to_string()
    }
  }

  let ioc = LocalContainer::new();
  ioc
    .register_trait::<dyn Greeter>(|_| Ok(Rc::new(English)))
    .unwrap();

  let greeter = ioc.resolve::<dyn Greeter>().unwrap();
  assert_eq!(greeter.greet(), "Hello");
}

#[test]
fn local_deferred_handle_breaks_a_cycle() {
  struct Alpha {
    beta: Rc<Beta>,
  }
  struct Beta {
    alpha: LocalLazy<Alpha>,
  }
  impl Inject<LocalContainer> for Alpha {
    fn inject(ioc: &LocalContainer) -> Result<Self, ResolveError> {
      Ok(Self { beta: ioc.resolve()? })
    }
  }
  impl Inject<LocalContainer> for Beta {
    fn inject(ioc: &LocalContainer) -> Result<Self, ResolveError> {
      Ok(Self {
        alpha: ioc.resolve_deferred()?,
      })
    }
  }

  let ioc = LocalContainer::new();
  ioc.register_single_instance::<Alpha>().unwrap();
  ioc.register_single_instance::<Beta>().unwrap();

  let alpha = ioc.resolve::<Alpha>().unwrap();
  let through_handle = alpha.beta.alpha.value().unwrap();
  assert!(Rc::ptr_eq(&alpha, &through_handle));
}

#[test]
fn local_container_holds_not_send_types() {
  // `Rc<i32>` is neither `Send` nor `Sync`; the thread-safe container
  // cannot store this service.
  struct NotSendService {
    data: Rc<i32>,
  }

  let ioc = LocalContainer::new();
  let shared = Rc::new(42);
  ioc
    .register_factory(move || NotSendService {
      data: Rc::clone(&shared),
    })
    .unwrap();

  let service = ioc.resolve::<NotSendService>().unwrap();
  assert_eq!(*service.data, 42);
}

#[test]
fn local_duplicate_registration_is_rejected() {
  let ioc = LocalContainer::new();
  ioc.register_instance(String::from("first")).unwrap();

  let err = ioc.register_instance(String::from("second")).unwrap_err();
  assert!(matches!(err, RegisterError::AlreadyRegistered(_)));
  assert_eq!(*ioc.resolve::<String>().unwrap(), "first");
}

#[test]
fn local_missing_service_fails() {
  #[derive(Debug)]
  struct Missing;
  let ioc = LocalContainer::new();

  let err = ioc.resolve::<Missing>().unwrap_err();
  assert!(matches!(err, ResolveError::NotRegistered(_)));
}

#[test]
#[should_panic(expected = "Circular dependency detected")]
fn local_eager_cycle_panics() {
  struct ServiceA {
    _b: Rc<ServiceB>,
  }
  struct ServiceB {
    _a: Rc<ServiceA>,
  }
  impl Inject<LocalContainer> for ServiceA {
    fn inject(ioc: &LocalContainer) -> Result<Self, ResolveError> {
      Ok(Self { _b: ioc.resolve()? })
    }
  }
  impl Inject<LocalContainer> for ServiceB {
    fn inject(ioc: &LocalContainer) -> Result<Self, ResolveError> {
      Ok(Self { _a: ioc.resolve()? })
    }
  }

  let ioc = LocalContainer::new();
  ioc.register_single_instance::<ServiceA>().unwrap();
  ioc.register_single_instance::<ServiceB>().unwrap();

  let _ = ioc.resolve::<ServiceA>();
}
