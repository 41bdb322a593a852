use std::sync::Arc;
use tether_registry::{service, Blueprint, CapabilityKey, Constructor, Error, Injectable, Instance, Registry};

// --- Test Fixtures ---

// The trait must be Send + Sync for the registry to serve it.
trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello!".to_string()
  }
}
service!(EnglishGreeter => dyn Greeter);

#[derive(Debug, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}
service!(SimpleService);

// A type with nothing but a zero-parameter constructor.
#[derive(Default)]
struct Counter {
  start: u32,
}
service!(Counter);
impl Injectable for Counter {
  fn blueprint() -> Blueprint<Self> {
    Blueprint::from_default()
  }
}

// A type whose sole constructor needs a `dyn Greeter`.
struct Welcome {
  greeter: Arc<dyn Greeter>,
}
service!(Welcome);
impl Injectable for Welcome {
  fn blueprint() -> Blueprint<Self> {
    Blueprint::new().constructor(Constructor::unary(|greeter: Arc<dyn Greeter>| Welcome { greeter }))
  }
}

// --- Basic Tests ---

#[test]
fn test_insert_then_get_returns_same_instance() {
  // Arrange
  let registry = Registry::new();

  // Act
  let inserted = registry.insert(SimpleService { id: 101 }).unwrap();
  let r1 = registry.get::<SimpleService>().unwrap();
  let r2 = registry.get::<SimpleService>().unwrap();

  // Assert
  assert_eq!(r1.id, 101);
  assert!(Arc::ptr_eq(&inserted, &r1));
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_second_insert_under_same_key_is_rejected() {
  // Arrange
  let registry = Registry::new();
  registry.insert(SimpleService { id: 1 }).unwrap();

  // Act
  let second = registry.insert(SimpleService { id: 2 });

  // Assert
  assert_eq!(
    second.unwrap_err(),
    Error::DuplicateKey(CapabilityKey::of::<SimpleService>())
  );
  // The original binding is untouched.
  assert_eq!(registry.get::<SimpleService>().unwrap().id, 1);
  assert_eq!(registry.len(), 1);
}

#[test]
fn test_insert_as_trait_key() {
  // Arrange
  let registry = Registry::new();

  // Act
  registry
    .insert_as::<EnglishGreeter, dyn Greeter>(Arc::new(EnglishGreeter))
    .unwrap();

  // Assert
  assert!(registry.contains::<dyn Greeter>());
  assert!(!registry.contains::<EnglishGreeter>());
  assert_eq!(registry.get::<dyn Greeter>().unwrap().greet(), "Hello!");
}

#[test]
fn test_insert_as_unrelated_key_is_a_type_mismatch() {
  let registry = Registry::new();

  let result = registry.insert_as::<SimpleService, dyn Greeter>(Arc::new(SimpleService { id: 3 }));

  assert_eq!(
    result.unwrap_err(),
    Error::TypeMismatch {
      actual: CapabilityKey::of::<SimpleService>(),
      requested: CapabilityKey::of::<dyn Greeter>(),
    }
  );
  assert!(registry.is_empty());
}

#[test]
fn test_add_rejects_absent_instance() {
  let registry = Registry::new();

  let result = registry.add(None, Some(CapabilityKey::of::<dyn Greeter>()));

  assert_eq!(result.unwrap_err(), Error::NullArgument("instance"));
  assert!(registry.is_empty());
}

#[test]
fn test_add_defaults_to_concrete_key() {
  let registry = Registry::new();

  registry.add(Some(Instance::new(EnglishGreeter)), None).unwrap();

  assert_eq!(registry.keys(), vec![CapabilityKey::of::<EnglishGreeter>()]);
}

#[test]
fn test_get_falls_back_to_assignable_instance() {
  // Arrange: registered under its concrete type only.
  let registry = Registry::new();
  let concrete = registry.insert(EnglishGreeter).unwrap();

  // Act: looked up by a trait it implements.
  let greeter = registry.get::<dyn Greeter>().unwrap();

  // Assert
  assert_eq!(greeter.greet(), "Hello!");
  assert!(std::ptr::eq(
    Arc::as_ptr(&greeter) as *const u8,
    Arc::as_ptr(&concrete) as *const u8
  ));
  // The fallback does not bind a new key.
  assert!(!registry.contains::<dyn Greeter>());
}

#[test]
fn test_get_unknown_key_returns_none() {
  let registry = Registry::new();
  registry.insert(SimpleService { id: 9 }).unwrap();

  assert!(registry.get::<dyn Greeter>().is_none());
  assert!(registry.get::<EnglishGreeter>().is_none());
}

#[test]
fn test_create_with_zero_parameter_constructor_on_empty_registry() {
  // Arrange
  let registry = Registry::new();

  // Act
  let counter = registry.create::<Counter>().unwrap();

  // Assert
  assert_eq!(counter.start, 0);
  assert!(Arc::ptr_eq(&counter, &registry.get::<Counter>().unwrap()));
}

#[test]
fn test_create_injects_registered_dependency() {
  // Arrange
  let registry = Registry::new();
  let english = registry.insert(EnglishGreeter).unwrap();

  // Act
  let welcome = registry.create::<Welcome>().unwrap();

  // Assert: the dependency is the registered object, not a copy.
  assert_eq!(welcome.greeter.greet(), "Hello!");
  assert!(std::ptr::eq(
    Arc::as_ptr(&welcome.greeter) as *const u8,
    Arc::as_ptr(&english) as *const u8
  ));
}

#[test]
fn test_create_with_missing_dependency_leaves_registry_unchanged() {
  // Arrange
  let registry = Registry::new();
  registry.insert(SimpleService { id: 5 }).unwrap();
  let before = registry.keys();

  // Act
  let result = registry.create::<Welcome>();

  // Assert
  assert_eq!(
    result.err(),
    Some(Error::UnresolvableDependency {
      key: CapabilityKey::of::<Welcome>(),
      missing: vec![CapabilityKey::of::<dyn Greeter>()],
    })
  );
  assert_eq!(registry.keys(), before);
}

#[test]
fn test_get_or_create_twice_binds_once() {
  // Arrange
  let registry = Registry::new();

  // Act
  let first = registry.get_or_create::<Counter>().unwrap();
  let second = registry.get_or_create::<Counter>().unwrap();

  // Assert
  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(registry.len(), 1);
}

#[test]
fn test_enumeration_follows_insertion_order() {
  let registry = Registry::new();
  registry.insert(SimpleService { id: 1 }).unwrap();
  registry.insert(EnglishGreeter).unwrap();
  registry.create::<Counter>().unwrap();

  let names: Vec<_> = (&registry).into_iter().map(|instance| instance.type_name()).collect();

  assert_eq!(
    names,
    vec![
      std::any::type_name::<SimpleService>(),
      std::any::type_name::<EnglishGreeter>(),
      std::any::type_name::<Counter>(),
    ]
  );
}
