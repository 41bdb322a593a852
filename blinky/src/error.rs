use thiserror::Error;

/// The error type for the blink demo.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),

  #[error("Invalid configuration value for '{field}': {message}")]
  InvalidConfigValue { field: String, message: String },

  #[error("Failed to set global tracing subscriber: {0}")]
  LoggingInit(String),

  #[error("Service registry error: {0}")]
  Registry(#[from] tether_registry::Error),

  #[error("No LED service is registered")]
  MissingLedService,

  #[error("Blink thread failed: {0}")]
  BlinkThread(String),
}

/// A specialized `Result` type for the blink demo.
pub type Result<T, E = Error> = std::result::Result<T, E>;
