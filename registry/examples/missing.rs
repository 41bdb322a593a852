use std::sync::Arc;
use tether_registry::{resolve, service, Blueprint, Constructor, Error, Injectable, Registry};
use std::panic;

trait Database: Send + Sync {}

struct UnregisteredService;
service!(UnregisteredService);

struct Repository {
  _db: Arc<dyn Database>,
}
service!(Repository);

impl Injectable for Repository {
  fn blueprint() -> Blueprint<Self> {
    Blueprint::new().constructor(Constructor::unary(|db: Arc<dyn Database>| Repository { _db: db }))
  }
}

fn main() {
  let registry = Registry::new();

  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");
  let result = panic::catch_unwind(|| {
    let _service = resolve!(Registry::new(), UnregisteredService);
  });
  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the non-panicking `get()` method ---
  println!("\nNow, attempting to resolve using `get()`...");
  match registry.get::<UnregisteredService>() {
    Some(_) => panic!("Should not have found the service!"),
    None => println!("Correctly received `None` for the missing service."),
  }

  // --- Creating a type whose dependency is missing ---
  println!("\nCreating a Repository without a Database registered...");
  match registry.create::<Repository>() {
    Err(error @ Error::UnresolvableDependency { .. }) => println!("Failed as expected: {}", error),
    Err(other) => panic!("Unexpected error: {}", other),
    Ok(_) => panic!("Repository should not have been created!"),
  }
  assert!(registry.is_empty());
}
