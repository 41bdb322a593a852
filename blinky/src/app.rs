//! Registry bootstrap for the blink demo.

use crate::board::SimulatedBoard;
use crate::config::{Backend, BlinkyConfig};
use crate::error::{Error, Result};
use crate::led::{GpioLedService, LedService, MockLedService};
use std::sync::Arc;
use tether_registry::Registry;

pub const BOARD_NAME: &str = "F7Micro (simulated)";

/// Builds the registry: the board first, then the configured LED service as `dyn LedService`.
pub fn bootstrap(config: &BlinkyConfig) -> Result<Registry> {
  let registry = Registry::new();
  registry.insert(SimulatedBoard::new(BOARD_NAME))?;

  match config.backend {
    Backend::Gpio => {
      registry.create_as::<GpioLedService, dyn LedService>()?;
    }
    Backend::Mock => {
      registry.create_as::<MockLedService, dyn LedService>()?;
    }
  }

  tracing::info!(backend = ?config.backend, services = registry.len(), "registry ready");
  Ok(registry)
}

/// The LED service the bootstrap registered.
pub fn led_service(registry: &Registry) -> Result<Arc<dyn LedService>> {
  registry.get::<dyn LedService>().ok_or(Error::MissingLedService)
}
