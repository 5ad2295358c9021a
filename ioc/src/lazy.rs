//! Deferred resolution handles.

use crate::container::Container;
use crate::error::ResolveError;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A deferred handle to a service of type `S`.
///
/// Obtained from [`Container::resolve_deferred`], and typically held as a
/// field by a service whose dependency graph would otherwise be cyclic.
/// Handing out the handle does not construct the target; the first
/// [`value`](Lazy::value) call resolves it through the container and caches
/// the result for the lifetime of the handle.
///
/// Reading the handle from inside the target's own construction re-enters
/// the cycle the handle was meant to cut, and trips the resolution guard.
/// Read it from application logic, after construction has finished.
pub struct Lazy<S: ?Sized + Any + Send + Sync> {
  ioc: Container,
  cell: OnceCell<Arc<S>>,
}

impl<S: ?Sized + Any + Send + Sync> Lazy<S> {
  pub(crate) fn new(ioc: Container) -> Self {
    Self {
      ioc,
      cell: OnceCell::new(),
    }
  }

  /// The resolved target, resolving it on the first call.
  ///
  /// Later calls return the cached instance without going back to the
  /// container, even if the target is registered transient.
  pub fn value(&self) -> Result<Arc<S>, ResolveError> {
    self
      .cell
      .get_or_try_init(|| self.ioc.resolve::<S>())
      .cloned()
  }
}

impl<S: ?Sized + Any + Send + Sync> fmt::Debug for Lazy<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Lazy")
      .field("service", &std::any::type_name::<S>())
      .field("resolved", &self.cell.get().is_some())
      .finish()
  }
}
