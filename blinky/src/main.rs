use std::time::Duration;
use tether_blinky::{bootstrap, led_service, logging, BlinkLoop, BlinkyConfig, Error};

fn main() -> Result<(), Error> {
  let config = BlinkyConfig::load(None)?;
  logging::init(&config.log_level)?;
  tracing::info!(?config, "starting blinky");

  let registry = bootstrap(&config)?;
  for instance in &registry {
    tracing::debug!(service = instance.type_name(), "registered");
  }

  let led = led_service(&registry)?;
  let handle = BlinkLoop::new(led, Duration::from_millis(config.interval_ms))
    .with_cycles(config.cycles)
    .spawn()
    .map_err(|e| Error::BlinkThread(e.to_string()))?;

  let completed = handle
    .join()
    .map_err(|_| Error::BlinkThread("blink thread panicked".to_string()))?;
  tracing::info!(completed, "blinky done");
  Ok(())
}
