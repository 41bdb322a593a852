//! Declared constructors and injectable properties of a constructible type.
//!
//! A [`Blueprint`] is the explicit replacement for runtime reflection: it lists the
//! constructors of a type, in order, with the capability key of every parameter,
//! and the properties the registry may fill in after construction.

use crate::core::{CapabilityKey, Instance, Service};
use crate::error::{Error, Result};
use crate::registry::Registry;
use std::sync::Arc;

/// A [`Service`] the registry knows how to build.
///
/// ```
/// use std::sync::Arc;
/// use tether_registry::{Blueprint, Constructor, Injectable, Registry, Service};
///
/// struct Config(u16);
/// impl Service for Config {}
///
/// struct Server {
///   port: u16,
/// }
/// impl Service for Server {}
/// impl Injectable for Server {
///   fn blueprint() -> Blueprint<Self> {
///     Blueprint::new().constructor(Constructor::unary(|config: Arc<Config>| Server { port: config.0 }))
///   }
/// }
///
/// let registry = Registry::new();
/// registry.insert(Config(8080)).unwrap();
/// assert_eq!(registry.create::<Server>().unwrap().port, 8080);
/// ```
pub trait Injectable: Service {
  fn blueprint() -> Blueprint<Self>;
}

/// Positional access to the instances resolved for a constructor's parameters.
pub struct Arguments {
  values: std::vec::IntoIter<Instance>,
}

impl Arguments {
  fn new(values: Vec<Instance>) -> Self {
    Self {
      values: values.into_iter(),
    }
  }

  /// Takes the next argument as capability `A`.
  ///
  /// Returns `None` when the arguments are exhausted or the next one is not assignable to `A`.
  pub fn take<A: ?Sized + Send + Sync + 'static>(&mut self) -> Option<Arc<A>> {
    self.values.next()?.downcast::<A>()
  }
}

type Invoke<T> = Box<dyn Fn(&mut Arguments) -> Option<T> + Send + Sync>;

/// One way of constructing `T`.
pub struct Constructor<T> {
  params: Vec<CapabilityKey>,
  invoke: Invoke<T>,
}

impl<T: Service> Constructor<T> {
  /// A constructor whose parameters are declared by key and read back through [`Arguments`].
  ///
  /// Returning `None` from `invoke` marks the constructor as unsatisfiable.
  pub fn with_params(
    params: Vec<CapabilityKey>,
    invoke: impl Fn(&mut Arguments) -> Option<T> + Send + Sync + 'static,
  ) -> Self {
    Self {
      params,
      invoke: Box::new(invoke),
    }
  }

  pub fn nullary(invoke: impl Fn() -> T + Send + Sync + 'static) -> Self {
    Self::with_params(Vec::new(), move |_| Some(invoke()))
  }

  pub fn unary<A: ?Sized + Send + Sync + 'static>(invoke: impl Fn(Arc<A>) -> T + Send + Sync + 'static) -> Self {
    Self::with_params(vec![CapabilityKey::of::<A>()], move |args| Some(invoke(args.take::<A>()?)))
  }

  pub fn binary<A, B>(invoke: impl Fn(Arc<A>, Arc<B>) -> T + Send + Sync + 'static) -> Self
  where
    A: ?Sized + Send + Sync + 'static,
    B: ?Sized + Send + Sync + 'static,
  {
    Self::with_params(
      vec![CapabilityKey::of::<A>(), CapabilityKey::of::<B>()],
      move |args| Some(invoke(args.take::<A>()?, args.take::<B>()?)),
    )
  }

  pub fn ternary<A, B, C>(invoke: impl Fn(Arc<A>, Arc<B>, Arc<C>) -> T + Send + Sync + 'static) -> Self
  where
    A: ?Sized + Send + Sync + 'static,
    B: ?Sized + Send + Sync + 'static,
    C: ?Sized + Send + Sync + 'static,
  {
    Self::with_params(
      vec![
        CapabilityKey::of::<A>(),
        CapabilityKey::of::<B>(),
        CapabilityKey::of::<C>(),
      ],
      move |args| Some(invoke(args.take::<A>()?, args.take::<B>()?, args.take::<C>()?)),
    )
  }

  pub fn params(&self) -> &[CapabilityKey] {
    &self.params
  }
}

type Inject<T> = Box<dyn Fn(&mut T, &Instance) -> bool + Send + Sync>;

/// A settable slot of `T` the registry fills in after construction.
///
/// A readable property is only assigned while it still holds its unset value; a
/// write-only property is assigned whenever a matching instance is registered.
pub struct Property<T> {
  key: CapabilityKey,
  inject: Inject<T>,
}

impl<T: Service> Property<T> {
  /// An `Option<Arc<A>>` field, injected only while it is `None`.
  pub fn optional<A: ?Sized + Send + Sync + 'static>(slot: fn(&mut T) -> &mut Option<Arc<A>>) -> Self {
    Self::readable(
      move |target: &mut T| slot(target).is_none(),
      move |target: &mut T, value: Arc<A>| *slot(target) = Some(value),
    )
  }

  /// A property with its own notion of "unset", checked right before assignment.
  pub fn readable<A: ?Sized + Send + Sync + 'static>(
    is_unset: impl Fn(&mut T) -> bool + Send + Sync + 'static,
    set: impl Fn(&mut T, Arc<A>) + Send + Sync + 'static,
  ) -> Self {
    Self {
      key: CapabilityKey::of::<A>(),
      inject: Box::new(move |target: &mut T, instance: &Instance| {
        if !is_unset(target) {
          return false;
        }
        match instance.downcast::<A>() {
          Some(value) => {
            set(target, value);
            true
          }
          None => false,
        }
      }),
    }
  }

  /// A property that cannot be read back.
  pub fn write_only<A: ?Sized + Send + Sync + 'static>(set: impl Fn(&mut T, Arc<A>) + Send + Sync + 'static) -> Self {
    Self {
      key: CapabilityKey::of::<A>(),
      inject: Box::new(move |target: &mut T, instance: &Instance| match instance.downcast::<A>() {
        Some(value) => {
          set(target, value);
          true
        }
        None => false,
      }),
    }
  }

  pub fn key(&self) -> CapabilityKey {
    self.key
  }
}

/// The constructors and properties of `T`, in declaration order.
pub struct Blueprint<T> {
  constructors: Vec<Constructor<T>>,
  properties: Vec<Property<T>>,
}

impl<T: Service> Default for Blueprint<T> {
  fn default() -> Self {
    Self {
      constructors: Vec::new(),
      properties: Vec::new(),
    }
  }
}

impl<T: Service> Blueprint<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// A blueprint with a single zero-parameter constructor calling `T::default()`.
  pub fn from_default() -> Self
  where
    T: Default,
  {
    Self::new().constructor(Constructor::nullary(T::default))
  }

  pub fn constructor(mut self, constructor: Constructor<T>) -> Self {
    self.constructors.push(constructor);
    self
  }

  pub fn property(mut self, property: Property<T>) -> Self {
    self.properties.push(property);
    self
  }

  /// Shorthand for `property(Property::optional(slot))`.
  pub fn inject<A: ?Sized + Send + Sync + 'static>(self, slot: fn(&mut T) -> &mut Option<Arc<A>>) -> Self {
    self.property(Property::optional(slot))
  }

  pub fn constructors(&self) -> &[Constructor<T>] {
    &self.constructors
  }

  pub fn properties(&self) -> &[Property<T>] {
    &self.properties
  }

  fn construct(&self, registry: &Registry) -> Result<T> {
    // A zero-parameter constructor wins outright and needs no lookups.
    if let Some(constructor) = self.constructors.iter().find(|c| c.params.is_empty()) {
      if let Some(value) = (constructor.invoke)(&mut Arguments::new(Vec::new())) {
        tracing::debug!(type_name = std::any::type_name::<T>(), "constructed with zero-parameter constructor");
        return Ok(value);
      }
    }

    for (index, constructor) in self.constructors.iter().enumerate() {
      if constructor.params.is_empty() {
        continue;
      }
      let Some(resolved) = registry.resolve_all(&constructor.params) else {
        continue;
      };
      if let Some(value) = (constructor.invoke)(&mut Arguments::new(resolved)) {
        tracing::debug!(
          type_name = std::any::type_name::<T>(),
          constructor = index,
          params = constructor.params.len(),
          "constructed with injected constructor"
        );
        return Ok(value);
      }
    }

    Err(Error::UnresolvableDependency {
      key: CapabilityKey::of::<T>(),
      missing: self.first_missing(registry),
    })
  }

  fn first_missing(&self, registry: &Registry) -> Vec<CapabilityKey> {
    let mut missing: Vec<CapabilityKey> = Vec::new();
    for constructor in &self.constructors {
      for key in &constructor.params {
        if registry.find_assignable(key).is_none() && !missing.contains(key) {
          missing.push(*key);
        }
      }
    }
    missing
  }

  fn inject_properties(&self, value: &mut T, registry: &Registry) {
    for property in &self.properties {
      let Some(candidate) = registry.find_assignable(&property.key) else {
        continue;
      };
      if (property.inject)(value, &candidate) {
        tracing::debug!(
          type_name = std::any::type_name::<T>(),
          property = %property.key,
          from = candidate.type_name(),
          "injected property"
        );
      }
    }
  }
}

/// Type-erased view of a `Blueprint<T>`, stored in the registry's blueprint cache.
pub(crate) trait Constructible: Send + Sync {
  fn type_key(&self) -> CapabilityKey;
  fn is_assignable_to(&self, key: &CapabilityKey) -> bool;
  fn build(&self, registry: &Registry) -> Result<Instance>;
}

pub(crate) struct Declared<T: Service> {
  blueprint: Blueprint<T>,
  capabilities: Vec<CapabilityKey>,
}

impl<T: Injectable> Declared<T> {
  pub(crate) fn new() -> Self {
    Self {
      blueprint: T::blueprint(),
      capabilities: crate::core::Capabilities::<T>::of().keys().collect(),
    }
  }
}

impl<T: Service> Constructible for Declared<T> {
  fn type_key(&self) -> CapabilityKey {
    CapabilityKey::of::<T>()
  }

  fn is_assignable_to(&self, key: &CapabilityKey) -> bool {
    self.capabilities.contains(key)
  }

  fn build(&self, registry: &Registry) -> Result<Instance> {
    let mut value = self.blueprint.construct(registry)?;
    self.blueprint.inject_properties(&mut value, registry);
    Ok(Instance::new(value))
  }
}
