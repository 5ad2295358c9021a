//! The main `Container` struct and its associated methods.

use crate::core::{ResolutionGuard, ServiceKey};
use crate::error::{RegisterError, ResolveError};
use crate::inject::Inject;
use crate::lazy::Lazy;
use crate::resolver::{BoxedService, Resolver, ResolverKind};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;

/// The Inversion of Control (IoC) container.
///
/// `Container` maps service types to [`Resolver`]s and produces instances on
/// demand, wiring dependencies through the builder closures supplied at
/// registration time. The value is a cheap handle: clones share one
/// registry, which is how deferred handles keep a line back to the container
/// that issued them. There is no implicit global container; construct one
/// and pass it to whatever composes your services.
///
/// The intended discipline is single-writer-then-many-readers: finish
/// registering before resolving from multiple threads. Registration is
/// thread-safe at any point, but interleaving it with concurrent resolution
/// of the same services is not a supported pattern.
#[derive(Clone, Default)]
pub struct Container {
  registry: Arc<DashMap<ServiceKey, ResolverKind>>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- REGISTRATION ---

  /// Stores `resolver` under `S`'s key.
  ///
  /// The fundamental registration operation; the other `register*` methods
  /// are conveniences over it. Fails with
  /// [`RegisterError::AlreadyRegistered`] if `S` already has a resolver,
  /// leaving the existing registration untouched.
  pub fn register_resolver<S: ?Sized + Any + Send + Sync>(
    &self,
    resolver: Resolver<S>,
  ) -> Result<(), RegisterError> {
    let key = ServiceKey::of::<S>();
    match self.registry.entry(key) {
      Entry::Occupied(_) => Err(RegisterError::AlreadyRegistered(key)),
      Entry::Vacant(slot) => {
        slot.insert(resolver.kind);
        Ok(())
      }
    }
  }

  /// Registers `T` against itself: every resolution builds a fresh `T`
  /// through its [`Inject`] impl.
  pub fn register<T: Inject + Any + Send + Sync>(&self) -> Result<(), RegisterError> {
    self.register_resolver(Resolver::transient(<T as Inject>::inject))
  }

  /// Registers `T` against itself, built once on first resolution and
  /// shared thereafter.
  pub fn register_single_instance<T: Inject + Any + Send + Sync>(
    &self,
  ) -> Result<(), RegisterError> {
    self.register_resolver(Resolver::single_instance(<T as Inject>::inject))
  }

  /// Registers the abstraction `S`, with `build` naming the concrete
  /// implementation. A fresh instance is built per resolution.
  pub fn register_trait<S: ?Sized + Any + Send + Sync>(
    &self,
    build: impl Fn(&Container) -> Result<Arc<S>, ResolveError> + Send + Sync + 'static,
  ) -> Result<(), RegisterError> {
    self.register_resolver(Resolver::transient_arc(build))
  }

  /// Registers the abstraction `S`, built once and shared thereafter.
  pub fn register_single_instance_trait<S: ?Sized + Any + Send + Sync>(
    &self,
    build: impl Fn(&Container) -> Result<Arc<S>, ResolveError> + Send + Sync + 'static,
  ) -> Result<(), RegisterError> {
    self.register_resolver(Resolver::single_instance_arc(build))
  }

  /// Registers a zero-argument factory, called on every resolution of `T`.
  pub fn register_factory<T: Any + Send + Sync>(
    &self,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) -> Result<(), RegisterError> {
    self.register_resolver(Resolver::factory(factory))
  }

  /// Registers a pre-built value under its own concrete type.
  pub fn register_instance<T: Any + Send + Sync>(&self, value: T) -> Result<(), RegisterError> {
    self.register_resolver(Resolver::instance(value))
  }

  /// Registers a pre-built value under the abstraction `S`.
  pub fn register_instance_trait<S: ?Sized + Any + Send + Sync>(
    &self,
    value: Arc<S>,
  ) -> Result<(), RegisterError> {
    self.register_resolver(Resolver::instance_arc(value))
  }

  // --- RESOLUTION ---

  /// Resolves an instance of `S` now.
  ///
  /// Fails with [`ResolveError::NotRegistered`] if `S` has no resolver;
  /// otherwise the registered strategy decides whether the instance is
  /// freshly built or shared. Panics if `S` is already being resolved
  /// further up this thread's call chain (an eager cycle that a deferred
  /// handle should cut).
  pub fn resolve<S: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<S>, ResolveError> {
    let key = ServiceKey::of::<S>();
    let _guard = ResolutionGuard::new(key);

    let resolver = self
      .registry
      .get(&key)
      .ok_or(ResolveError::NotRegistered(key))?;

    match resolver.value() {
      ResolverKind::Transient { build } => build(self).map(owned::<S>),
      ResolverKind::SingleInstance { cell, build } => {
        cell.get_or_try_init(|| build(self)).map(shared::<S>)
      }
      ResolverKind::Factory { produce } => Ok(owned::<S>(produce())),
      ResolverKind::Instance { value } => Ok(shared::<S>(value)),
    }
  }

  /// Returns a deferred handle for `S` without constructing anything.
  ///
  /// The target must already be registered (fails with
  /// [`ResolveError::NotRegistered`] otherwise); the handle resolves it on
  /// the first [`Lazy::value`] call. This is the deferred request shape that
  /// breaks dependency cycles: the side holding a `Lazy` can be constructed
  /// before its counterpart exists.
  pub fn resolve_deferred<S: ?Sized + Any + Send + Sync>(&self) -> Result<Lazy<S>, ResolveError> {
    let key = ServiceKey::of::<S>();
    if !self.registry.contains_key(&key) {
      return Err(ResolveError::NotRegistered(key));
    }
    Ok(Lazy::new(self.clone()))
  }
}

fn shared<S: ?Sized + Any + Send + Sync>(value: &BoxedService) -> Arc<S> {
  value
    .downcast_ref::<Arc<S>>()
    .cloned()
    .expect("registry invariant: the value under a key is an Arc of the key's type")
}

fn owned<S: ?Sized + Any + Send + Sync>(value: BoxedService) -> Arc<S> {
  match value.downcast::<Arc<S>>() {
    Ok(arc) => *arc,
    Err(_) => unreachable!("registry invariant: the value under a key is an Arc of the key's type"),
  }
}
