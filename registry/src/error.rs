use crate::core::CapabilityKey;
use thiserror::Error;

/// Errors raised by [`Registry`](crate::Registry) operations.
///
/// Every error is returned to the caller of the offending operation. A failed
/// operation never leaves a partial entry behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// A required argument was absent.
  #[error("required argument `{0}` is absent")]
  NullArgument(&'static str),

  /// The key is already bound to an instance.
  #[error("an instance is already registered for {0}")]
  DuplicateKey(CapabilityKey),

  /// The type to create or insert is not assignable to the requested key.
  #[error("type {actual} is not assignable to {requested}")]
  TypeMismatch {
    actual: CapabilityKey,
    requested: CapabilityKey,
  },

  /// No declared constructor of `key` had all of its parameters registered.
  #[error("no satisfiable constructor for {key} (unresolved: {})", display_keys(.missing))]
  UnresolvableDependency {
    key: CapabilityKey,
    missing: Vec<CapabilityKey>,
  },

  /// `create_by_key` was asked for a type whose blueprint was never declared.
  #[error("no blueprint declared for {0}")]
  Undeclared(CapabilityKey),
}

fn display_keys(keys: &[CapabilityKey]) -> String {
  if keys.is_empty() {
    return "none".to_string();
  }
  keys
    .iter()
    .map(|key| key.type_name())
    .collect::<Vec<_>>()
    .join(", ")
}

/// A specialized `Result` type for registry operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
