use std::sync::Arc;
use tether_registry::{resolve, service, Blueprint, Constructor, Injectable, Registry};

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation and declare it can be served as `dyn Logger`
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}
service!(ConsoleLogger => dyn Logger);

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}
service!(ReportService);

impl Injectable for ReportService {
  fn blueprint() -> Blueprint<Self> {
    Blueprint::new().constructor(Constructor::unary(|logger: Arc<dyn Logger>| ReportService { logger }))
  }
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  let registry = Registry::new();

  // --- Registration ---
  // ConsoleLogger is registered under its own type; `dyn Logger` lookups still find it.
  registry.insert(ConsoleLogger).expect("logger registered once");

  // The registry builds ReportService, handing the logger to its constructor.
  registry.create::<ReportService>().expect("logger is registered");

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = resolve!(registry, ReportService);
  report_service.generate_report();
}
