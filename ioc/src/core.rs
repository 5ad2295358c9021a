//! Service identity and the re-entrancy guard shared by the container variants.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

thread_local! {
  // The set of services currently being resolved on this thread. A key that
  // shows up twice means an eager dependency cycle.
  static RESOLVING_STACK: RefCell<HashSet<ServiceKey>> = RefCell::new(HashSet::new());
}

/// An RAII guard that detects eager dependency cycles.
///
/// Created at the start of every direct resolution. If the key is already on
/// this thread's resolution stack, the requested service is (transitively)
/// being constructed further up the call chain and the recursion would never
/// bottom out, so the guard panics. Dropping the guard pops the key again.
pub(crate) struct ResolutionGuard {
  key: ServiceKey,
}

impl ResolutionGuard {
  pub(crate) fn new(key: ServiceKey) -> Self {
    RESOLVING_STACK.with(|stack| {
      // `insert` returns `false` if the key was already present.
      if !stack.borrow_mut().insert(key) {
        panic!(
          "Circular dependency detected while resolving service: {:?}. \
           Take one side of the cycle as a deferred handle instead.",
          key
        );
      }
    });
    Self { key }
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}

/// The identity a service is registered and resolved under.
///
/// At most one resolver may be stored per key for the lifetime of a
/// container. Equality and hashing consider only the `TypeId`; the type name
/// is carried for diagnostics.
#[derive(Clone, Copy)]
pub struct ServiceKey {
  type_id: TypeId,
  type_name: &'static str,
}

impl ServiceKey {
  /// The key for the service type `S`.
  pub fn of<S: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<S>(),
      type_name: std::any::type_name::<S>(),
    }
  }

  /// The name of the type this key identifies.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }
}

impl PartialEq for ServiceKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ServiceKey({})", self.type_name)
  }
}
