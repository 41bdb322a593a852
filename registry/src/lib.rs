//! # Tether Registry
//!
//! A small, thread-safe, in-process service registry for Rust.
//!
//! The registry maps a capability (a concrete type or a trait object) to exactly one
//! live instance. Instances are either inserted directly or created by the registry,
//! which resolves constructor and property dependencies from what is already
//! registered.
//!
//! ## Core Concepts
//!
//! - **Registry**: the explicit, shared map from capability key to instance. Create
//!   one at startup and pass it by reference.
//! - **Service**: a type that can live in the registry. Its capability table says
//!   which trait objects it is assignable to.
//! - **Injectable**: a service with a [`Blueprint`]: ordered constructors with
//!   declared parameter capabilities, plus injectable properties.
//! - **Resolution**: lookups match the exact key first and then fall back to the
//!   first assignable instance in insertion order.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tether_registry::{service, Blueprint, Constructor, Injectable, Registry};
//!
//! trait Greeter: Send + Sync {
//!   fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter;
//! impl Greeter for EnglishGreeter {
//!   fn greet(&self) -> String {
//!     "Hello, World!".to_string()
//!   }
//! }
//! service!(EnglishGreeter => dyn Greeter);
//!
//! struct Welcome {
//!   greeter: Arc<dyn Greeter>,
//! }
//! service!(Welcome);
//!
//! impl Injectable for Welcome {
//!   fn blueprint() -> Blueprint<Self> {
//!     Blueprint::new().constructor(Constructor::unary(|greeter: Arc<dyn Greeter>| Welcome { greeter }))
//!   }
//! }
//!
//! let registry = Registry::new();
//! registry.insert(EnglishGreeter).unwrap();
//!
//! let welcome = registry.create::<Welcome>().unwrap();
//! assert_eq!(welcome.greeter.greet(), "Hello, World!");
//! ```

mod blueprint;
mod core;
mod error;
mod macros;
mod registry;

pub use crate::blueprint::{Arguments, Blueprint, Constructor, Injectable, Property};
pub use crate::core::{Capabilities, CapabilityKey, Instance, Service};
pub use crate::error::{Error, Result};
pub use crate::registry::Registry;
