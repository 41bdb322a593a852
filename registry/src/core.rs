//! Capability keys, capability tables and the erased `Instance` handle.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

type Erased = Arc<dyn Any + Send + Sync>;
type ErasedCast = Arc<dyn Fn(&Erased) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// Identifies a capability: a concrete type or a trait object such as `dyn Greeter`.
///
/// Equality and hashing only consider the `TypeId`. The type name is carried along
/// so errors and log lines can say which type was involved.
#[derive(Clone, Copy)]
pub struct CapabilityKey {
  type_id: TypeId,
  type_name: &'static str,
}

impl CapabilityKey {
  pub fn of<K: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<K>(),
      type_name: std::any::type_name::<K>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }
}

impl PartialEq for CapabilityKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for CapabilityKey {}

impl Hash for CapabilityKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for CapabilityKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key({})", self.type_name)
  }
}

impl fmt::Display for CapabilityKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.type_name)
  }
}

/// A type that can live in a [`Registry`](crate::Registry).
///
/// The default implementation only makes the type assignable to itself. Override
/// [`Service::capabilities`] (or use the [`service!`](crate::service) macro) to
/// declare the trait objects the type may be served as.
///
/// ```
/// use std::sync::Arc;
/// use tether_registry::{Capabilities, Service};
///
/// trait Greeter: Send + Sync {
///   fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///   fn greet(&self) -> String {
///     "Hello!".to_string()
///   }
/// }
///
/// impl Service for English {
///   fn capabilities(table: &mut Capabilities<Self>) {
///     table.provide::<dyn Greeter>(|it| it);
///   }
/// }
/// ```
pub trait Service: Sized + Send + Sync + 'static {
  fn capabilities(table: &mut Capabilities<Self>) {
    let _ = table;
  }
}

/// The capability table of a concrete type `T`.
///
/// Always contains `T` itself; every other entry is a cast from `Arc<T>` to the
/// `Arc` of a trait object `T` implements.
pub struct Capabilities<T> {
  casts: Vec<(CapabilityKey, ErasedCast)>,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Service> Capabilities<T> {
  pub(crate) fn of() -> Self {
    let mut table = Self {
      casts: Vec::new(),
      _marker: PhantomData,
    };
    table.provide::<T>(|it| it);
    T::capabilities(&mut table);
    table
  }

  /// Declares that `T` can be served as `I`.
  ///
  /// The cast is almost always the identity closure `|it| it`, which lets the
  /// compiler perform the unsizing coercion to `Arc<I>`.
  pub fn provide<I: ?Sized + Send + Sync + 'static>(&mut self, cast: fn(Arc<T>) -> Arc<I>) -> &mut Self {
    let key = CapabilityKey::of::<I>();
    if self.casts.iter().any(|(existing, _)| *existing == key) {
      return self;
    }
    let erased: ErasedCast = Arc::new(move |value: &Erased| {
      value
        .clone()
        .downcast::<T>()
        .ok()
        .map(|concrete| Box::new(cast(concrete)) as Box<dyn Any + Send + Sync>)
    });
    self.casts.push((key, erased));
    self
  }

  pub fn contains(&self, key: &CapabilityKey) -> bool {
    self.casts.iter().any(|(existing, _)| existing == key)
  }

  pub fn keys(&self) -> impl Iterator<Item = CapabilityKey> + '_ {
    self.casts.iter().map(|(key, _)| *key)
  }

  fn into_erased(self) -> Arc<[(CapabilityKey, ErasedCast)]> {
    self.casts.into()
  }
}

/// A shared, type-erased handle to one live object and its capability table.
///
/// Cloning an `Instance` clones the handle, never the object.
#[derive(Clone)]
pub struct Instance {
  concrete: CapabilityKey,
  value: Erased,
  casts: Arc<[(CapabilityKey, ErasedCast)]>,
}

impl Instance {
  pub fn new<T: Service>(value: T) -> Self {
    Self::from_arc(Arc::new(value))
  }

  pub fn from_arc<T: Service>(value: Arc<T>) -> Self {
    Self {
      concrete: CapabilityKey::of::<T>(),
      value,
      casts: Capabilities::<T>::of().into_erased(),
    }
  }

  /// The key of the object's concrete type.
  pub fn concrete_key(&self) -> CapabilityKey {
    self.concrete
  }

  pub fn type_name(&self) -> &'static str {
    self.concrete.type_name()
  }

  pub fn is_assignable_to(&self, key: &CapabilityKey) -> bool {
    self.casts.iter().any(|(candidate, _)| candidate == key)
  }

  /// Views the object as capability `K`. Returns `None` if it is not assignable to `K`.
  pub fn downcast<K: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<K>> {
    let key = CapabilityKey::of::<K>();
    let (_, cast) = self.casts.iter().find(|(candidate, _)| *candidate == key)?;
    cast(&self.value)?
      .downcast::<Arc<K>>()
      .ok()
      .map(|boxed| *boxed)
  }

  /// Whether both handles point at the same object.
  pub fn ptr_eq(&self, other: &Instance) -> bool {
    Arc::ptr_eq(&self.value, &other.value)
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Instance")
      .field("type", &self.concrete.type_name())
      .field("capabilities", &self.casts.iter().map(|(key, _)| key).collect::<Vec<_>>())
      .finish()
  }
}
