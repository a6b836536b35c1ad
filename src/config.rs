//! Button configuration.
//!
//! Immutable once handed to [`Button::init`](crate::drivers::button::Button::init).
//! The debounce window and sample count were compile-time constants on the
//! first hardware revision; they are configurable here with the same defaults.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::press::PressThresholds;

/// Debounce confirmation window (milliseconds).
pub const DEFAULT_DEBOUNCE_MS: u32 = 5;
/// Consecutive confirmation samples taken right after an edge is reported.
pub const DEFAULT_SAMPLE_COUNT: u8 = 5;

/// Exclusive upper bound for a line number: one bit of `gpio_config_t::pin_bit_mask`.
pub const MAX_GPIO_LINES: i32 = 64;

/// GPIO line identifier (ESP-IDF `gpio_num_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(pub i32);

impl LineId {
    /// A real pin: non-negative and inside the pin mask.
    pub const fn is_valid(self) -> bool {
        self.0 >= 0 && self.0 < MAX_GPIO_LINES
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// Which logic level means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// Switch to ground with a pull-up: pressed reads LOW.
    ActiveLow,
    /// Switch to VCC with a pull-down: pressed reads HIGH.
    ActiveHigh,
}

impl Polarity {
    /// Logic level the line sits at while the button is pressed.
    pub const fn pressed_level(self) -> bool {
        matches!(self, Self::ActiveHigh)
    }

    /// Whether the line needs the internal pull-up (otherwise pull-down).
    pub const fn pull_up(self) -> bool {
        matches!(self, Self::ActiveLow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub line: LineId,
    pub polarity: Polarity,
    pub thresholds: PressThresholds,
    pub debounce_ms: u32,
    pub sample_count: u8,
}

impl ButtonConfig {
    pub fn new(line: LineId, polarity: Polarity) -> Self {
        Self {
            line,
            polarity,
            thresholds: PressThresholds::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }

    pub fn with_thresholds(mut self, thresholds: PressThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_sample_count(mut self, sample_count: u8) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.line.is_valid() {
            return Err(ConfigError::InvalidLine(self.line.0));
        }
        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounceWindow);
        }
        if self.sample_count == 0 {
            return Err(ConfigError::ZeroSampleCount);
        }
        self.thresholds.validate()
    }
}
