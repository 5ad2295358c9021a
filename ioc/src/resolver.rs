//! Resolver variants: the construction strategies a service can be
//! registered with.

use crate::container::Container;
use crate::error::ResolveError;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

/// A resolved service, type-erased. The value stored under a key is always
/// an `Arc<S>` for that key's `S`.
pub(crate) type BoxedService = Box<dyn Any + Send + Sync>;

/// A builder closure: pulls its dependencies out of the container and
/// assembles the instance.
pub(crate) type BuildFn =
  Box<dyn Fn(&Container) -> Result<BoxedService, ResolveError> + Send + Sync>;

pub(crate) enum ResolverKind {
  /// Runs the builder on every resolution.
  Transient { build: BuildFn },
  /// Runs the builder at most once; every later resolution reads the cell.
  /// The cell is owned by this resolver alone.
  SingleInstance {
    cell: OnceCell<BoxedService>,
    build: BuildFn,
  },
  /// Invokes the supplied zero-argument callable on every resolution.
  Factory {
    produce: Box<dyn Fn() -> BoxedService + Send + Sync>,
  },
  /// Hands back the same pre-built value on every resolution.
  Instance { value: BoxedService },
}

/// A construction strategy for a service of type `S`.
///
/// Most code goes through the `register*` conveniences on
/// [`Container`]; those are thin wrappers that build a `Resolver` and pass
/// it to [`Container::register_resolver`]. Constructing one directly covers
/// the combinations the conveniences leave out, such as a factory producing
/// a trait object.
pub struct Resolver<S: ?Sized> {
  pub(crate) kind: ResolverKind,
  _service: PhantomData<S>,
}

impl<S: ?Sized> Resolver<S> {
  fn from_kind(kind: ResolverKind) -> Self {
    Self {
      kind,
      _service: PhantomData,
    }
  }
}

impl<S: Any + Send + Sync> Resolver<S> {
  /// A fresh instance per resolution, assembled by `build`.
  pub fn transient(
    build: impl Fn(&Container) -> Result<S, ResolveError> + Send + Sync + 'static,
  ) -> Self {
    Self::from_kind(ResolverKind::Transient {
      build: Box::new(move |ioc| Ok(Box::new(Arc::new(build(ioc)?)))),
    })
  }

  /// Built by `build` on first resolution, shared thereafter.
  pub fn single_instance(
    build: impl Fn(&Container) -> Result<S, ResolveError> + Send + Sync + 'static,
  ) -> Self {
    Self::from_kind(ResolverKind::SingleInstance {
      cell: OnceCell::new(),
      build: Box::new(move |ioc| Ok(Box::new(Arc::new(build(ioc)?)))),
    })
  }

  /// Calls `factory` on every resolution.
  pub fn factory(factory: impl Fn() -> S + Send + Sync + 'static) -> Self {
    Self::from_kind(ResolverKind::Factory {
      produce: Box::new(move || Box::new(Arc::new(factory()))),
    })
  }

  /// Always resolves to `value`.
  pub fn instance(value: S) -> Self {
    Self::from_kind(ResolverKind::Instance {
      value: Box::new(Arc::new(value)),
    })
  }
}

impl<S: ?Sized + Any + Send + Sync> Resolver<S> {
  /// Trait-object form of [`Resolver::transient`]: `build` names the
  /// implementation behind the abstraction and supplies the coercion.
  pub fn transient_arc(
    build: impl Fn(&Container) -> Result<Arc<S>, ResolveError> + Send + Sync + 'static,
  ) -> Self {
    Self::from_kind(ResolverKind::Transient {
      build: Box::new(move |ioc| Ok(Box::new(build(ioc)?))),
    })
  }

  /// Trait-object form of [`Resolver::single_instance`].
  pub fn single_instance_arc(
    build: impl Fn(&Container) -> Result<Arc<S>, ResolveError> + Send + Sync + 'static,
  ) -> Self {
    Self::from_kind(ResolverKind::SingleInstance {
      cell: OnceCell::new(),
      build: Box::new(move |ioc| Ok(Box::new(build(ioc)?))),
    })
  }

  /// Trait-object form of [`Resolver::factory`].
  pub fn factory_arc(factory: impl Fn() -> Arc<S> + Send + Sync + 'static) -> Self {
    Self::from_kind(ResolverKind::Factory {
      produce: Box::new(move || Box::new(factory())),
    })
  }

  /// Trait-object form of [`Resolver::instance`].
  pub fn instance_arc(value: Arc<S>) -> Self {
    Self::from_kind(ResolverKind::Instance {
      value: Box::new(value),
    })
  }
}
