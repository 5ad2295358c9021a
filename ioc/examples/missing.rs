//! What resolution errors look like.

use truss_ioc::{Container, ResolveError, ServiceKey};

struct UnregisteredService;

fn main() {
  let ioc = Container::new();

  match ioc.resolve::<UnregisteredService>() {
    Ok(_) => panic!("should not have found the service"),
    Err(err) => {
      assert_eq!(
        err,
        ResolveError::NotRegistered(ServiceKey::of::<UnregisteredService>())
      );
      println!("direct resolution failed as expected: {err}");
    }
  }

  // Deferred requests are validated up front as well: no handle is issued
  // for a target that is not registered.
  let err = ioc
    .resolve_deferred::<UnregisteredService>()
    .expect_err("no handle for a missing target");
  println!("deferred resolution failed as expected: {err}");
}
