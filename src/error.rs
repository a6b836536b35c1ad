//! Unified error types for the button driver.
//!
//! A single `Error` enum that every lifecycle operation funnels into.
//! All variants are `Copy` so they can be returned from interrupt-adjacent
//! code without allocation.  Noise and bounce conditions are *not* errors:
//! the state machine absorbs them silently and only counts them.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The button configuration is invalid.  This is a programming error:
    /// `Button::init` refuses to build an instance from it.
    Config(ConfigError),
    /// The input line could not be sampled.
    InputRead,
    /// The debounce timer could not be armed.
    TimerArm,
    /// The edge notification source rejected the registration.
    EdgeRegister,
    /// `start` was called on a button that is already running.
    AlreadyStarted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::InputRead => write!(f, "input line read failed"),
            Self::TimerArm => write!(f, "debounce timer could not be armed"),
            Self::EdgeRegister => write!(f, "edge listener registration failed"),
            Self::AlreadyStarted => write!(f, "button already started"),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// GPIO line is negative (`GPIO_NUM_NC`) or past the 64-bit pin mask.
    InvalidLine(i32),
    /// Debounce window must be at least 1 ms.
    ZeroDebounceWindow,
    /// At least one confirmation sample is required.
    ZeroSampleCount,
    /// Classification thresholds must be strictly ascending.
    ThresholdsNotAscending,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLine(n) => write!(f, "GPIO line {n} is not a valid input"),
            Self::ZeroDebounceWindow => write!(f, "debounce window is zero"),
            Self::ZeroSampleCount => write!(f, "sample count is zero"),
            Self::ThresholdsNotAscending => write!(f, "press thresholds are not strictly ascending"),
        }
    }
}

impl std::error::Error for Error {}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
