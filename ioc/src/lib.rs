//! # Truss IoC
//!
//! A minimal, thread-safe Inversion of Control (IoC) container with deferred
//! resolution for cyclic service graphs.
//!
//! Services are registered against a [`Container`] by type, with one of four
//! construction strategies: transient (a fresh instance per resolution),
//! single instance (built once, shared), factory (a zero-argument callable
//! invoked per resolution), or a pre-built value. Construction-based
//! registrations state their dependencies in an [`Inject`] impl, the
//! designated constructor, which pulls each dependency back out of the
//! container.
//!
//! ## Core concepts
//!
//! - **Container**: the registry of services, an explicitly constructed
//!   value that is cheap to clone (clones share one registry). There is no
//!   implicit global container; pass the container to whatever composes your
//!   services, and finish registering before resolving from many threads.
//! - **Resolution**: [`Container::resolve`] returns `Arc<S>` for a
//!   registered `S` and fails with [`ResolveError::NotRegistered`]
//!   otherwise. The [`resolve!`] macro is the panicking shorthand.
//! - **Deferred resolution**: [`Container::resolve_deferred`] returns a
//!   [`Lazy`] handle that resolves its target on first read and memoizes it.
//!   Two services that depend on each other can both be constructed if one
//!   of them takes its dependency as a `Lazy<_>` field.
//! - **Traits**: services can be registered against a trait and resolved as
//!   `Arc<dyn Trait>`.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use truss_ioc::{resolve, Container};
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter {
//!     message: Arc<String>,
//! }
//!
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         (*self.message).clone()
//!     }
//! }
//!
//! let ioc = Container::new();
//!
//! // A plain value, and a service registered against a trait. The builder
//! // closure resolves its own dependencies from the container.
//! ioc.register_instance(String::from("Hello, World!")).unwrap();
//! ioc.register_single_instance_trait::<dyn Greeter>(|ioc| {
//!     Ok(Arc::new(EnglishGreeter { message: ioc.resolve()? }))
//! })
//! .unwrap();
//!
//! // Elsewhere in the application, resolve by the trait.
//! let greeter = resolve!(ioc, trait Greeter);
//! assert_eq!(greeter.greet(), "Hello, World!");
//! ```

mod container;
mod core;
mod error;
mod inject;
mod lazy;
#[cfg(feature = "local")]
mod local_container;
mod macros;
mod resolver;

pub use container::Container;
pub use error::{RegisterError, ResolveError};
pub use inject::Inject;
pub use lazy::Lazy;
#[cfg(feature = "local")]
pub use local_container::{LocalContainer, LocalLazy};
pub use resolver::Resolver;

pub use crate::core::ServiceKey;
