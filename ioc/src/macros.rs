//! Public macros for ergonomic service resolution.

/// Resolves a service from a container, panicking if it is missing.
///
/// This is the shorthand for call sites where a missing registration is a
/// bug. For fallible resolution use [`Container::resolve`] and
/// [`Container::resolve_deferred`] directly.
///
/// The second argument selects the request shape: a plain type, `trait Name`
/// for a trait object, or either of those prefixed with `lazy` for a
/// deferred handle.
///
/// [`Container::resolve`]: crate::Container::resolve
/// [`Container::resolve_deferred`]: crate::Container::resolve_deferred
///
/// # Panics
///
/// Panics if the service cannot be resolved.
///
/// # Examples
///
/// ```
/// use truss_ioc::{resolve, Container};
///
/// let ioc = Container::new();
/// ioc.register_instance(String::from("hello")).unwrap();
///
/// let message = resolve!(ioc, String);
/// assert_eq!(*message, "hello");
/// ```
///
/// ```
/// use std::sync::Arc;
/// use truss_ioc::{resolve, Container};
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter {
///     fn greet(&self) -> String {
///         "Hello!".to_string()
///     }
/// }
///
/// let ioc = Container::new();
/// ioc.register_trait::<dyn Greeter>(|_| Ok(Arc::new(EnglishGreeter))).unwrap();
///
/// let greeter = resolve!(ioc, trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
///
/// let handle = resolve!(ioc, lazy trait Greeter);
/// assert_eq!(handle.value().unwrap().greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
    // Deferred handle to a trait object: resolve!(ioc, lazy trait MyTrait)
    ($ioc:expr, lazy trait $trait_ident:ident) => {
        $ioc.resolve_deferred::<dyn $trait_ident>()
            .unwrap_or_else(|err| panic!("failed to defer required trait service: {}", err))
    };

    // Deferred handle: resolve!(ioc, lazy MyService)
    ($ioc:expr, lazy $ty:ty) => {
        $ioc.resolve_deferred::<$ty>()
            .unwrap_or_else(|err| panic!("failed to defer required service: {}", err))
    };

    // Trait object: resolve!(ioc, trait MyTrait)
    // `:ident` rather than `:ty`, so that `dyn $trait_ident` can be formed
    // in the expansion.
    ($ioc:expr, trait $trait_ident:ident) => {
        $ioc.resolve::<dyn $trait_ident>()
            .unwrap_or_else(|err| panic!("failed to resolve required trait service: {}", err))
    };

    // Concrete type: resolve!(ioc, MyService)
    ($ioc:expr, $ty:ty) => {
        $ioc.resolve::<$ty>()
            .unwrap_or_else(|err| panic!("failed to resolve required service: {}", err))
    };
}
