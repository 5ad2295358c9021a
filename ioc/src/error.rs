//! Error types for registration and resolution.

use crate::core::ServiceKey;
use std::fmt;

/// Error returned by the `register*` family of calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
  /// The key already has a resolver. The existing registration is untouched;
  /// the failed call is a no-op.
  AlreadyRegistered(ServiceKey),
}

impl RegisterError {
  /// The type identity the failed call was registering.
  pub fn key(&self) -> ServiceKey {
    match self {
      RegisterError::AlreadyRegistered(key) => *key,
    }
  }
}

impl fmt::Display for RegisterError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RegisterError::AlreadyRegistered(key) => {
        write!(f, "{} is already registered", key.type_name())
      }
    }
  }
}

impl std::error::Error for RegisterError {}

/// Error returned by `resolve`, `resolve_deferred` and `Lazy::value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
  /// The requested abstraction has no resolver.
  NotRegistered(ServiceKey),
}

impl ResolveError {
  /// The type identity the failed request asked for.
  pub fn key(&self) -> ServiceKey {
    match self {
      ResolveError::NotRegistered(key) => *key,
    }
  }
}

impl fmt::Display for ResolveError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ResolveError::NotRegistered(key) => {
        write!(f, "cannot resolve {}, it is not registered", key.type_name())
      }
    }
  }
}

impl std::error::Error for ResolveError {}
