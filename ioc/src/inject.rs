//! Constructor injection for implementation types.

use crate::container::Container;
use crate::error::ResolveError;

/// The designated constructor of an injectable service.
///
/// `inject` is the one place a type states its dependencies: it pulls each
/// of them from the container (eagerly via [`Container::resolve`], or as a
/// deferred handle via [`Container::resolve_deferred`] for a `Lazy<_>`
/// field) and assembles the value. [`Container::register`] and
/// [`Container::register_single_instance`] use this impl as the builder, so
/// a type has exactly one injection constructor, checked at compile time.
///
/// The container parameter defaults to [`Container`]; implement
/// `Inject<LocalContainer>` to make a type constructible by the
/// single-threaded variant (behind the `local` feature).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use truss_ioc::{Container, Inject, ResolveError};
///
/// struct Config {
///     url: String,
/// }
///
/// struct Client {
///     config: Arc<Config>,
/// }
///
/// impl Inject for Client {
///     fn inject(ioc: &Container) -> Result<Self, ResolveError> {
///         Ok(Self { config: ioc.resolve()? })
///     }
/// }
///
/// let ioc = Container::new();
/// ioc.register_instance(Config { url: "http://localhost".into() }).unwrap();
/// ioc.register::<Client>().unwrap();
///
/// let client = ioc.resolve::<Client>().unwrap();
/// assert_eq!(client.config.url, "http://localhost");
/// ```
pub trait Inject<C = Container>: Sized {
  /// Builds the value, pulling dependencies from `ioc`.
  fn inject(ioc: &C) -> Result<Self, ResolveError>;
}
