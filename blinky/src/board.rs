//! The device handle and its digital output ports.

use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};
use tether_registry::service;

/// The pins wired to the onboard RGB LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pin {
  OnboardLedRed,
  OnboardLedGreen,
  OnboardLedBlue,
}

pub trait DigitalOutput: Send + Sync {
  fn pin(&self) -> Pin;
  fn set_state(&self, state: bool);
  fn state(&self) -> bool;
}

/// A board that can hand out output ports.
pub trait Board: Send + Sync {
  fn name(&self) -> &str;
  fn open_output(&self, pin: Pin) -> Arc<dyn DigitalOutput>;
}

struct SimulatedOutput {
  pin: Pin,
  state: AtomicBool,
}

impl DigitalOutput for SimulatedOutput {
  fn pin(&self) -> Pin {
    self.pin
  }

  fn set_state(&self, state: bool) {
    let previous = self.state.swap(state, Ordering::SeqCst);
    if previous != state {
      tracing::trace!(pin = ?self.pin, state, "pin level changed");
    }
  }

  fn state(&self) -> bool {
    self.state.load(Ordering::SeqCst)
  }
}

/// An in-memory board. Every opened port stays observable through [`SimulatedBoard::level`].
pub struct SimulatedBoard {
  name: String,
  outputs: Mutex<Vec<Arc<SimulatedOutput>>>,
}

service!(SimulatedBoard => dyn Board);

impl SimulatedBoard {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      outputs: Mutex::new(Vec::new()),
    }
  }

  /// The level of the most recently opened port for `pin`, if any was opened.
  pub fn level(&self, pin: Pin) -> Option<bool> {
    self
      .outputs
      .lock()
      .iter()
      .rev()
      .find(|output| output.pin == pin)
      .map(|output| output.state())
  }

  pub fn opened(&self) -> usize {
    self.outputs.lock().len()
  }
}

impl Board for SimulatedBoard {
  fn name(&self) -> &str {
    &self.name
  }

  fn open_output(&self, pin: Pin) -> Arc<dyn DigitalOutput> {
    let output = Arc::new(SimulatedOutput {
      pin,
      state: AtomicBool::new(false),
    });
    self.outputs.lock().push(Arc::clone(&output));
    tracing::debug!(board = %self.name, ?pin, "opened digital output");
    output
  }
}
