//! The `Registry` struct and its associated methods.

use crate::blueprint::{Constructible, Declared, Injectable};
use crate::core::{CapabilityKey, Instance, Service};
use crate::error::{Error, Result};
use dashmap::DashMap;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// The service registry.
///
/// Maps each capability key to exactly one live instance. Keys are bound once and
/// never rebound. The map keeps insertion order, which is the order every
/// "first assignable instance" search walks.
///
/// The registry is thread-safe. Mutations hold the write lock for the whole
/// check-then-write sequence; lookups take the read lock.
#[derive(Default)]
pub struct Registry {
  instances: RwLock<IndexMap<CapabilityKey, Instance>>,
  blueprints: DashMap<CapabilityKey, Arc<dyn Constructible>>,
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn bind(&self, key: CapabilityKey, instance: Instance) -> Result<()> {
    let mut instances = self.instances.write();
    if instances.contains_key(&key) {
      return Err(Error::DuplicateKey(key));
    }
    tracing::debug!(key = %key, concrete = instance.type_name(), "bound instance");
    instances.insert(key, instance);
    Ok(())
  }

  /// The first instance, in insertion order, assignable to `key`.
  pub(crate) fn find_assignable(&self, key: &CapabilityKey) -> Option<Instance> {
    self
      .instances
      .read()
      .values()
      .find(|instance| instance.is_assignable_to(key))
      .cloned()
  }

  /// Resolves every key against one consistent view of the map.
  pub(crate) fn resolve_all(&self, keys: &[CapabilityKey]) -> Option<Vec<Instance>> {
    let instances = self.instances.read();
    keys
      .iter()
      .map(|key| {
        instances
          .values()
          .find(|instance| instance.is_assignable_to(key))
          .cloned()
      })
      .collect()
  }

  fn blueprint(&self, key: &CapabilityKey) -> Option<Arc<dyn Constructible>> {
    self.blueprints.get(key).map(|entry| Arc::clone(entry.value()))
  }

  // --- PUBLIC API ---

  // --- Insertion ---

  /// Registers `instance` under its own concrete type.
  pub fn insert<T: Service>(&self, instance: T) -> Result<Arc<T>> {
    let shared = Arc::new(instance);
    self.insert_arc(Arc::clone(&shared))?;
    Ok(shared)
  }

  /// Registers an already shared instance under its own concrete type.
  pub fn insert_arc<T: Service>(&self, instance: Arc<T>) -> Result<()> {
    self.bind(CapabilityKey::of::<T>(), Instance::from_arc(instance))
  }

  /// Registers `instance` under capability `K`, which `T` must provide.
  pub fn insert_as<T: Service, K: ?Sized + Send + Sync + 'static>(&self, instance: Arc<T>) -> Result<()> {
    self.add(Some(Instance::from_arc(instance)), Some(CapabilityKey::of::<K>()))
  }

  /// Registers an erased instance.
  ///
  /// `register_as` defaults to the instance's concrete type. This is the entry point
  /// for bootstrap code whose values may be missing, such as device detection.
  pub fn add(&self, instance: Option<Instance>, register_as: Option<CapabilityKey>) -> Result<()> {
    let instance = instance.ok_or(Error::NullArgument("instance"))?;
    let key = register_as.unwrap_or_else(|| instance.concrete_key());
    if !instance.is_assignable_to(&key) {
      return Err(Error::TypeMismatch {
        actual: instance.concrete_key(),
        requested: key,
      });
    }
    self.bind(key, instance)
  }

  // --- Lookup ---

  /// Looks up capability `K`.
  ///
  /// An exact key match wins; otherwise the first instance, in insertion order,
  /// assignable to `K` is returned. `None` when nothing matches.
  pub fn get<K: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<K>> {
    self.get_by_key(&CapabilityKey::of::<K>())?.downcast::<K>()
  }

  /// Erased form of [`Registry::get`].
  pub fn get_by_key(&self, key: &CapabilityKey) -> Option<Instance> {
    let instances = self.instances.read();
    if let Some(bound) = instances.get(key) {
      return Some(bound.clone());
    }
    let fallback = instances
      .values()
      .find(|instance| instance.is_assignable_to(key))
      .cloned();
    if let Some(found) = &fallback {
      tracing::trace!(key = %key, concrete = found.type_name(), "resolved through assignable fallback");
    }
    fallback
  }

  /// Whether `K` is bound as a key. Does not consider assignable fallbacks.
  pub fn contains<K: ?Sized + 'static>(&self) -> bool {
    self.contains_key(&CapabilityKey::of::<K>())
  }

  pub fn contains_key(&self, key: &CapabilityKey) -> bool {
    self.instances.read().contains_key(key)
  }

  // --- Creation ---

  /// Makes `T`'s blueprint available to [`Registry::create_by_key`].
  pub fn declare<T: Injectable>(&self) {
    self
      .blueprints
      .entry(CapabilityKey::of::<T>())
      .or_insert_with(|| Arc::new(Declared::<T>::new()) as Arc<dyn Constructible>);
  }

  /// Builds `T`, injects its dependencies and registers it under `T`.
  pub fn create<T: Injectable>(&self) -> Result<Arc<T>> {
    self.create_as::<T, T>()
  }

  /// Builds `T`, injects its dependencies and registers it under capability `K`.
  pub fn create_as<T: Injectable, K: ?Sized + 'static>(&self) -> Result<Arc<T>> {
    self.declare::<T>();
    let created = CapabilityKey::of::<T>();
    let instance = self.create_by_key(created, Some(CapabilityKey::of::<K>()))?;
    instance.downcast::<T>().ok_or(Error::TypeMismatch {
      actual: instance.concrete_key(),
      requested: created,
    })
  }

  /// Erased creation of a previously declared type.
  ///
  /// 1. `register_as` defaults to `create`.
  /// 2. The created type must be assignable to `register_as`.
  /// 3. A zero-parameter constructor is preferred. Otherwise constructors are tried
  ///    in declared order, each parameter taking the first registered instance
  ///    assignable to it; the first fully satisfied constructor is used.
  /// 4. Unset properties are filled from the registry where possible.
  /// 5. The new instance is bound under `register_as`.
  ///
  /// If binding fails the new instance is dropped and the map is left unchanged.
  pub fn create_by_key(&self, create: CapabilityKey, register_as: Option<CapabilityKey>) -> Result<Instance> {
    let register_as = register_as.unwrap_or(create);
    let blueprint = self.blueprint(&create).ok_or(Error::Undeclared(create))?;
    if !blueprint.is_assignable_to(&register_as) {
      return Err(Error::TypeMismatch {
        actual: blueprint.type_key(),
        requested: register_as,
      });
    }

    let instance = blueprint.build(self)?;
    self.bind(register_as, instance.clone())?;
    Ok(instance)
  }

  /// Returns the instance [`Registry::get`] finds for `T`, or creates one.
  pub fn get_or_create<T: Injectable>(&self) -> Result<Arc<T>> {
    if let Some(existing) = self.get::<T>() {
      return Ok(existing);
    }
    self.create::<T>()
  }

  /// Returns the instance [`Registry::get`] finds for `K`, or creates a `T` registered as `K`.
  ///
  /// The existence check and the final registration are separate steps. Two threads
  /// racing on the same unbound key may both construct; one binds and the other gets
  /// [`Error::DuplicateKey`].
  pub fn get_or_create_as<T: Injectable, K: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<K>> {
    if let Some(existing) = self.get::<K>() {
      return Ok(existing);
    }
    self.declare::<T>();
    let requested = CapabilityKey::of::<K>();
    let instance = self.create_by_key(CapabilityKey::of::<T>(), Some(requested))?;
    instance.downcast::<K>().ok_or(Error::TypeMismatch {
      actual: instance.concrete_key(),
      requested,
    })
  }

  // --- Enumeration ---

  /// A snapshot of every bound instance, in insertion order.
  pub fn instances(&self) -> Vec<Instance> {
    self.instances.read().values().cloned().collect()
  }

  /// A snapshot of every bound key, in insertion order.
  pub fn keys(&self) -> Vec<CapabilityKey> {
    self.instances.read().keys().copied().collect()
  }

  pub fn len(&self) -> usize {
    self.instances.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.instances.read().is_empty()
  }
}

impl<'a> IntoIterator for &'a Registry {
  type Item = Instance;
  type IntoIter = std::vec::IntoIter<Instance>;

  fn into_iter(self) -> Self::IntoIter {
    self.instances().into_iter()
  }
}

impl std::fmt::Debug for Registry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Registry")
      .field("keys", &self.keys())
      .field("declared", &self.blueprints.len())
      .finish()
  }
}
