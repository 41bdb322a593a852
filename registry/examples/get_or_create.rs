use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tether_registry::{service, Blueprint, Constructor, Injectable, Registry};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}
service!(RequestTracker);

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl Injectable for RequestTracker {
  fn blueprint() -> Blueprint<Self> {
    Blueprint::new().constructor(Constructor::nullary(|| {
      println!("Creating RequestTracker...");
      RequestTracker {
        id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
      }
    }))
  }
}

fn main() {
  let registry = Registry::new();

  // The constructor only runs the first time.
  let t1 = registry.get_or_create::<RequestTracker>().expect("created");
  let t2 = registry.get_or_create::<RequestTracker>().expect("found");
  println!("Tracker 1 ID: {}, Tracker 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 0);
  assert!(Arc::ptr_eq(&t1, &t2), "both calls return the registered instance");

  // `create` never reuses: the key is already bound.
  let again = registry.create::<RequestTracker>();
  println!("Creating again: {}", again.err().map(|e| e.to_string()).unwrap_or_default());
  assert_eq!(registry.len(), 1);
}
