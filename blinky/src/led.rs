//! LED colors and the services that light them.

use crate::board::{Board, DigitalOutput, Pin};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tether_registry::{service, Blueprint, Constructor, Injectable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
  Red,
  Green,
  Blue,
}

impl Color {
  pub const ALL: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

  fn pin(self) -> Pin {
    match self {
      Color::Red => Pin::OnboardLedRed,
      Color::Green => Pin::OnboardLedGreen,
      Color::Blue => Pin::OnboardLedBlue,
    }
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Color::Red => f.write_str("Red"),
      Color::Green => f.write_str("Green"),
      Color::Blue => f.write_str("Blue"),
    }
  }
}

pub trait LedService: Send + Sync {
  fn illuminate(&self, color: Color, state: bool);
}

/// One observable change made by [`MockLedService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
  pub color: Color,
  pub state: bool,
}

impl fmt::Display for Effect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.color, if self.state { "ON" } else { "OFF" })
  }
}

/// Records every effect instead of driving hardware.
#[derive(Default)]
pub struct MockLedService {
  effects: Mutex<Vec<Effect>>,
}

service!(MockLedService => dyn LedService);

impl Injectable for MockLedService {
  fn blueprint() -> Blueprint<Self> {
    Blueprint::from_default()
  }
}

impl MockLedService {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn effects(&self) -> Vec<Effect> {
    self.effects.lock().clone()
  }
}

impl LedService for MockLedService {
  fn illuminate(&self, color: Color, state: bool) {
    let effect = Effect { color, state };
    tracing::info!("{} LED is now {}", color, if state { "ON" } else { "OFF" });
    self.effects.lock().push(effect);
  }
}

/// Drives the board's onboard LED, one output port per color.
pub struct GpioLedService {
  leds: [Arc<dyn DigitalOutput>; 3],
}

service!(GpioLedService => dyn LedService);

impl Injectable for GpioLedService {
  fn blueprint() -> Blueprint<Self> {
    Blueprint::new().constructor(Constructor::unary(|board: Arc<dyn Board>| GpioLedService::new(&*board)))
  }
}

impl GpioLedService {
  pub fn new(board: &dyn Board) -> Self {
    tracing::info!(board = board.name(), "opening onboard LED ports");
    Self {
      leds: Color::ALL.map(|color| board.open_output(color.pin())),
    }
  }

  fn output(&self, color: Color) -> &Arc<dyn DigitalOutput> {
    match color {
      Color::Red => &self.leds[0],
      Color::Green => &self.leds[1],
      Color::Blue => &self.leds[2],
    }
  }
}

impl LedService for GpioLedService {
  fn illuminate(&self, color: Color, state: bool) {
    self.output(color).set_state(state);
    tracing::info!("Set {} to {}", color, if state { "ON" } else { "OFF" });
  }
}
