//! PressButton library.
//!
//! Classifies presses of a single mechanical button by duration (short,
//! medium, long, long-long) from GPIO edge interrupts, with a debounce
//! timer instead of a polling task.
//!
//! The state machine lives in [`drivers::button`]; everything it touches
//! goes through the traits in [`ports`].  All ESP-IDF-specific code is
//! guarded by `#[cfg(target_os = "espidf")]` within each module, so the
//! crate builds and tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod config;
pub mod drivers;
pub mod error;
pub mod events;
pub mod pins;
pub mod ports;
pub mod press;
pub mod shared;
pub mod signal;

pub use config::{ButtonConfig, LineId, Polarity};
pub use drivers::button::{Button, ButtonStats};
pub use error::{ConfigError, Error, Result};
pub use press::{classify, PressEvent, PressKind, PressThresholds};
