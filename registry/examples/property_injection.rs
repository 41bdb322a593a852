use std::sync::Arc;
use tether_registry::{service, Blueprint, Injectable, Registry};

trait Metrics: Send + Sync {
  fn record(&self, name: &str);
}

struct StdoutMetrics;
impl Metrics for StdoutMetrics {
  fn record(&self, name: &str) {
    println!("metric: {}", name);
  }
}
service!(StdoutMetrics => dyn Metrics);

// Optional collaborators are declared as properties and filled in after construction.
#[derive(Default)]
struct Handler {
  metrics: Option<Arc<dyn Metrics>>,
}
service!(Handler);

impl Injectable for Handler {
  fn blueprint() -> Blueprint<Self> {
    Blueprint::from_default().inject(|h: &mut Handler| &mut h.metrics)
  }
}

impl Handler {
  fn handle(&self) {
    if let Some(metrics) = &self.metrics {
      metrics.record("handled");
    }
  }
}

fn main() {
  // Without metrics registered, creation still succeeds and the property stays empty.
  let bare = Registry::new();
  let handler = bare.create::<Handler>().expect("zero-parameter constructor");
  assert!(handler.metrics.is_none());

  // With metrics registered, the property is injected.
  let registry = Registry::new();
  registry.insert(StdoutMetrics).expect("inserted once");
  let handler = registry.create::<Handler>().expect("zero-parameter constructor");
  handler.handle();
}
