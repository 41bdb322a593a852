//! # Tether Blinky
//!
//! Walks the colors of a board's onboard LED, with every collaborator wired through a
//! [`tether_registry::Registry`].
//!
//! The board handle is inserted at startup. The LED service, hardware-backed or mock,
//! is created by the registry, which hands the board to its constructor.

pub mod app;
pub mod blink;
pub mod board;
pub mod config;
mod error;
pub mod led;
pub mod logging;

pub use app::{bootstrap, led_service};
pub use blink::BlinkLoop;
pub use config::{Backend, BlinkyConfig};
pub use error::{Error, Result};
