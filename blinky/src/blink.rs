//! The color-walking blink loop.

use crate::led::{Color, LedService};
use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};
use std::thread;
use std::time::Duration;

/// Walks every color, toggling the LED state once per pass.
pub struct BlinkLoop {
  led: Arc<dyn LedService>,
  interval: Duration,
  cycles: Option<u32>,
  stop: Arc<AtomicBool>,
}

impl BlinkLoop {
  pub fn new(led: Arc<dyn LedService>, interval: Duration) -> Self {
    Self {
      led,
      interval,
      cycles: None,
      stop: Arc::new(AtomicBool::new(false)),
    }
  }

  /// Stops after `cycles` passes instead of running until stopped.
  pub fn with_cycles(mut self, cycles: Option<u32>) -> Self {
    self.cycles = cycles;
    self
  }

  /// A flag that ends the loop at the next color step once raised.
  pub fn stop_handle(&self) -> Arc<AtomicBool> {
    Arc::clone(&self.stop)
  }

  /// Runs on the current thread. Returns the number of completed passes.
  pub fn run(&self) -> u32 {
    let mut state = false;
    let mut completed = 0;
    while self.cycles.map_or(true, |limit| completed < limit) {
      state = !state;
      for color in Color::ALL {
        if self.stop.load(Ordering::SeqCst) {
          tracing::debug!(completed, "blink loop stopped");
          return completed;
        }
        self.led.illuminate(color, state);
        if !self.interval.is_zero() {
          thread::sleep(self.interval);
        }
      }
      completed += 1;
    }
    tracing::debug!(completed, "blink loop finished");
    completed
  }

  /// Runs on a named background thread.
  pub fn spawn(self) -> std::io::Result<thread::JoinHandle<u32>> {
    thread::Builder::new()
      .name("blinky".to_string())
      .spawn(move || self.run())
  }
}
