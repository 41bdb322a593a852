//! Process-wide `tracing` subscriber setup.

use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Installs the fmt subscriber once per process.
///
/// `RUST_LOG` wins over `default_directive`. Later calls are no-ops.
pub fn init(default_directive: &str) -> Result<()> {
  INSTALLED
    .get_or_try_init(|| {
      let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| Error::LoggingInit(e.to_string()))?;
      tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_names(true))
        .try_init()
        .map_err(|e| Error::LoggingInit(e.to_string()))
    })
    .map(|_| ())
}
