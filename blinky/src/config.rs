//! Demo configuration, loaded from YAML.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::{
  env,
  fs::File,
  io,
  path::{Path, PathBuf},
};

const DEFAULT_CONFIG_BASE_NAME: &str = "blinky";
const DEFAULT_CONFIG_EXTENSION: &str = "yaml";

/// Which LED service the bootstrap creates.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
  /// Drives the board's onboard LED pins.
  #[default]
  Gpio,
  /// Records effects without touching the board.
  Mock,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BlinkyConfig {
  /// Delay between two color steps.
  #[serde(default = "default_interval_ms")]
  pub interval_ms: u64,
  /// Number of on/off passes over all colors. Absent means run until stopped.
  #[serde(default)]
  pub cycles: Option<u32>,
  /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
  #[serde(default = "default_log_level")]
  pub log_level: String,
  #[serde(default)]
  pub backend: Backend,
}

fn default_interval_ms() -> u64 {
  200
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for BlinkyConfig {
  fn default() -> Self {
    Self {
      interval_ms: default_interval_ms(),
      cycles: None,
      log_level: default_log_level(),
      backend: Backend::default(),
    }
  }
}

impl BlinkyConfig {
  pub fn from_yaml(source: &str) -> Result<Self> {
    let config: Self = serde_yaml::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))?;
    config.validate()?;
    Ok(config)
  }

  pub fn from_file(path: &Path) -> Result<Self> {
    let reader = io::BufReader::new(File::open(path)?);
    let config: Self = serde_yaml::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))?;
    config.validate()?;
    Ok(config)
  }

  /// Loads the file named by `BLINKY_CONFIG`, else the first config file found in the
  /// working directory, else the defaults.
  pub fn load(environment_suffix: Option<&str>) -> Result<Self> {
    if let Ok(explicit) = env::var("BLINKY_CONFIG") {
      if !explicit.is_empty() {
        return Self::from_file(Path::new(&explicit));
      }
    }
    match find_config_file(Path::new("."), environment_suffix) {
      Some(path) => Self::from_file(&path),
      None => Ok(Self::default()),
    }
  }

  fn validate(&self) -> Result<()> {
    if self.cycles == Some(0) {
      return Err(Error::InvalidConfigValue {
        field: "cycles".to_string(),
        message: "must be at least 1 when set".to_string(),
      });
    }
    if self.log_level.trim().is_empty() {
      return Err(Error::InvalidConfigValue {
        field: "log_level".to_string(),
        message: "must not be empty".to_string(),
      });
    }
    Ok(())
  }
}

/// Finds the configuration file in `dir`.
///
/// `blinky.<env>.yaml` is tried first, with `<env>` taken from `environment_suffix`,
/// `BLINKY_ENV` or `APP_ENV`, and then `blinky.yaml`. Only files inside `dir` are returned.
pub fn find_config_file(dir: &Path, environment_suffix: Option<&str>) -> Option<PathBuf> {
  let env_from_var = environment_suffix
    .map(|s| s.to_string())
    .or_else(|| env::var("BLINKY_ENV").ok())
    .or_else(|| env::var("APP_ENV").ok());

  let mut files_to_check: Vec<String> = Vec::new();
  if let Some(env_str) = &env_from_var {
    if !env_str.is_empty() {
      files_to_check.push(format!(
        "{}.{}.{}",
        DEFAULT_CONFIG_BASE_NAME, env_str, DEFAULT_CONFIG_EXTENSION
      ));
    }
  }
  files_to_check.push(format!("{}.{}", DEFAULT_CONFIG_BASE_NAME, DEFAULT_CONFIG_EXTENSION));

  files_to_check
    .iter()
    .map(|file_name| dir.join(file_name))
    .find(|path| path.is_file())
}
