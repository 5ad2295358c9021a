//! Transient versus single-instance lifetimes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use truss_ioc::{Container, Resolver};

struct SingletonTracker {
  id: usize,
}

struct TransientTracker {
  id: usize,
}

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  let ioc = Container::new();

  // This builder runs ONCE.
  ioc
    .register_resolver(Resolver::single_instance(|_| {
      println!("building the single-instance tracker");
      Ok(SingletonTracker {
        id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
      })
    }))
    .unwrap();

  // This factory runs on EVERY resolution.
  ioc
    .register_factory(|| {
      println!("building a transient tracker");
      TransientTracker {
        id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
      }
    })
    .unwrap();

  let s1 = ioc.resolve::<SingletonTracker>().unwrap();
  let s2 = ioc.resolve::<SingletonTracker>().unwrap();
  println!("single-instance ids: {} and {}", s1.id, s2.id);
  assert!(Arc::ptr_eq(&s1, &s2), "single instances should be identical");

  let t1 = ioc.resolve::<TransientTracker>().unwrap();
  let t2 = ioc.resolve::<TransientTracker>().unwrap();
  println!("transient ids: {} and {}", t1.id, t2.id);
  assert!(!Arc::ptr_eq(&t1, &t2), "transients should be distinct");
}
