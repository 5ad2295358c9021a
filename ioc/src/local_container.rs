//! A single-threaded, non-thread-safe variant of the container.

use crate::core::{ResolutionGuard, ServiceKey};
use crate::error::{RegisterError, ResolveError};
use crate::inject::Inject;
use once_cell::unsync::OnceCell;
use std::any::Any;
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

type BoxedLocal = Box<dyn Any>;
type LocalBuildFn = Box<dyn Fn(&LocalContainer) -> Result<BoxedLocal, ResolveError>>;

// The same four strategies as the thread-safe resolver, with `Rc` products
// and unsynchronized cells.
enum LocalResolver {
  Transient {
    build: LocalBuildFn,
  },
  SingleInstance {
    cell: OnceCell<BoxedLocal>,
    build: LocalBuildFn,
  },
  Factory {
    produce: Box<dyn Fn() -> BoxedLocal>,
  },
  Instance {
    value: BoxedLocal,
  },
}

/// A single-threaded Inversion of Control (IoC) container.
///
/// Same contract as [`Container`](crate::Container), with `Rc` products, a
/// plain `HashMap` registry and no `Send`/`Sync` bounds, so it can hold
/// services that are `!Send`. Clones share one registry.
///
/// Registration goes through a `RefCell`, so registering from inside a
/// builder mid-resolution panics; finish registering before resolving.
#[derive(Clone, Default)]
pub struct LocalContainer {
  registry: Rc<RefCell<HashMap<ServiceKey, LocalResolver>>>,
}

impl LocalContainer {
  /// Creates a new, empty `LocalContainer`.
  pub fn new() -> Self {
    Self::default()
  }

  fn insert(&self, key: ServiceKey, resolver: LocalResolver) -> Result<(), RegisterError> {
    match self.registry.borrow_mut().entry(key) {
      Entry::Occupied(_) => Err(RegisterError::AlreadyRegistered(key)),
      Entry::Vacant(slot) => {
        slot.insert(resolver);
        Ok(())
      }
    }
  }

  // --- REGISTRATION ---

  /// Registers `T` against itself: every resolution builds a fresh `T`
  /// through its `Inject<LocalContainer>` impl.
  pub fn register<T: Inject<LocalContainer> + Any>(&self) -> Result<(), RegisterError> {
    self.insert(
      ServiceKey::of::<T>(),
      LocalResolver::Transient {
        build: Box::new(|ioc| Ok(Box::new(Rc::new(<T as Inject<LocalContainer>>::inject(ioc)?)))),
      },
    )
  }

  /// Registers `T` against itself, built once and shared thereafter.
  pub fn register_single_instance<T: Inject<LocalContainer> + Any>(
    &self,
  ) -> Result<(), RegisterError> {
    self.insert(
      ServiceKey::of::<T>(),
      LocalResolver::SingleInstance {
        cell: OnceCell::new(),
        build: Box::new(|ioc| Ok(Box::new(Rc::new(<T as Inject<LocalContainer>>::inject(ioc)?)))),
      },
    )
  }

  /// Registers the abstraction `S`, with `build` naming the concrete
  /// implementation. A fresh instance is built per resolution.
  pub fn register_trait<S: ?Sized + Any>(
    &self,
    build: impl Fn(&LocalContainer) -> Result<Rc<S>, ResolveError> + 'static,
  ) -> Result<(), RegisterError> {
    self.insert(
      ServiceKey::of::<S>(),
      LocalResolver::Transient {
        build: Box::new(move |ioc| Ok(Box::new(build(ioc)?))),
      },
    )
  }

  /// Registers the abstraction `S`, built once and shared thereafter.
  pub fn register_single_instance_trait<S: ?Sized + Any>(
    &self,
    build: impl Fn(&LocalContainer) -> Result<Rc<S>, ResolveError> + 'static,
  ) -> Result<(), RegisterError> {
    self.insert(
      ServiceKey::of::<S>(),
      LocalResolver::SingleInstance {
        cell: OnceCell::new(),
        build: Box::new(move |ioc| Ok(Box::new(build(ioc)?))),
      },
    )
  }

  /// Registers a zero-argument factory, called on every resolution of `T`.
  pub fn register_factory<T: Any>(
    &self,
    factory: impl Fn() -> T + 'static,
  ) -> Result<(), RegisterError> {
    self.insert(
      ServiceKey::of::<T>(),
      LocalResolver::Factory {
        produce: Box::new(move || Box::new(Rc::new(factory()))),
      },
    )
  }

  /// Registers a pre-built value under its own concrete type.
  pub fn register_instance<T: Any>(&self, value: T) -> Result<(), RegisterError> {
    self.insert(
      ServiceKey::of::<T>(),
      LocalResolver::Instance {
        value: Box::new(Rc::new(value)),
      },
    )
  }

  /// Registers a pre-built value under the abstraction `S`.
  pub fn register_instance_trait<S: ?Sized + Any>(
    &self,
    value: Rc<S>,
  ) -> Result<(), RegisterError> {
    self.insert(
      ServiceKey::of::<S>(),
      LocalResolver::Instance {
        value: Box::new(value),
      },
    )
  }

  // --- RESOLUTION ---

  /// Resolves an instance of `S` now.
  pub fn resolve<S: ?Sized + Any>(&self) -> Result<Rc<S>, ResolveError> {
    let key = ServiceKey::of::<S>();
    let _guard = ResolutionGuard::new(key);

    let registry = self.registry.borrow();
    let resolver = registry.get(&key).ok_or(ResolveError::NotRegistered(key))?;

    match resolver {
      LocalResolver::Transient { build } => build(self).map(owned::<S>),
      LocalResolver::SingleInstance { cell, build } => {
        cell.get_or_try_init(|| build(self)).map(shared::<S>)
      }
      LocalResolver::Factory { produce } => Ok(owned::<S>(produce())),
      LocalResolver::Instance { value } => Ok(shared::<S>(value)),
    }
  }

  /// Returns a deferred handle for `S` without constructing anything.
  pub fn resolve_deferred<S: ?Sized + Any>(&self) -> Result<LocalLazy<S>, ResolveError> {
    let key = ServiceKey::of::<S>();
    if !self.registry.borrow().contains_key(&key) {
      return Err(ResolveError::NotRegistered(key));
    }
    Ok(LocalLazy {
      ioc: self.clone(),
      cell: OnceCell::new(),
    })
  }
}

fn shared<S: ?Sized + Any>(value: &BoxedLocal) -> Rc<S> {
  value
    .downcast_ref::<Rc<S>>()
    .cloned()
    .expect("registry invariant: the value under a key is an Rc of the key's type")
}

fn owned<S: ?Sized + Any>(value: BoxedLocal) -> Rc<S> {
  match value.downcast::<Rc<S>>() {
    Ok(rc) => *rc,
    Err(_) => unreachable!("registry invariant: the value under a key is an Rc of the key's type"),
  }
}

/// Single-threaded counterpart of [`Lazy`](crate::Lazy): resolves its target
/// through a [`LocalContainer`] on first read and memoizes the `Rc`.
pub struct LocalLazy<S: ?Sized + Any> {
  ioc: LocalContainer,
  cell: OnceCell<Rc<S>>,
}

impl<S: ?Sized + Any> LocalLazy<S> {
  /// The resolved target, resolving it on the first call.
  pub fn value(&self) -> Result<Rc<S>, ResolveError> {
    self
      .cell
      .get_or_try_init(|| self.ioc.resolve::<S>())
      .cloned()
  }
}

impl<S: ?Sized + Any> fmt::Debug for LocalLazy<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LocalLazy")
      .field("service", &std::any::type_name::<S>())
      .field("resolved", &self.cell.get().is_some())
      .finish()
  }
}
