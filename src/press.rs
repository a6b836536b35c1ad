//! Press categories and the duration → category classification policy.
//!
//! | Duration (ms)      | Category            |
//! |--------------------|---------------------|
//! | `< 200`            | [`PressKind::Short`]    |
//! | `[200, 700)`       | [`PressKind::Medium`]   |
//! | `[700, 2000)`      | [`PressKind::Long`]     |
//! | `[2000, 6000)`     | [`PressKind::LongLong`] |
//! | `>= 6000`          | [`PressKind::Undefined`]|
//!
//! Lower bounds are inclusive, upper bounds exclusive.  The boundaries are
//! configurable through [`PressThresholds`]; the table shows the defaults.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::LineId;
use crate::error::ConfigError;

pub const DEFAULT_SHORT_PRESS_MS: u32 = 200;
pub const DEFAULT_MEDIUM_PRESS_MS: u32 = 700;
pub const DEFAULT_LONG_PRESS_MS: u32 = 2000;
pub const DEFAULT_LONG_LONG_PRESS_MS: u32 = 6000;

/// Category of a completed press/release cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PressKind {
    Short,
    Medium,
    Long,
    LongLong,
    /// Held past the last threshold; usually a stuck or obstructed button.
    Undefined,
}

impl fmt::Display for PressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => write!(f, "short"),
            Self::Medium => write!(f, "medium"),
            Self::Long => write!(f, "long"),
            Self::LongLong => write!(f, "long-long"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

/// Upper (exclusive) bound of each category, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressThresholds {
    pub short_ms: u32,
    pub medium_ms: u32,
    pub long_ms: u32,
    pub long_long_ms: u32,
}

impl Default for PressThresholds {
    fn default() -> Self {
        Self {
            short_ms: DEFAULT_SHORT_PRESS_MS,
            medium_ms: DEFAULT_MEDIUM_PRESS_MS,
            long_ms: DEFAULT_LONG_PRESS_MS,
            long_long_ms: DEFAULT_LONG_LONG_PRESS_MS,
        }
    }
}

impl PressThresholds {
    /// Thresholds must be strictly ascending so the ranges neither overlap
    /// nor leave a category empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_ms < self.medium_ms
            && self.medium_ms < self.long_ms
            && self.long_ms < self.long_long_ms
        {
            Ok(())
        } else {
            Err(ConfigError::ThresholdsNotAscending)
        }
    }

    /// Map a press duration to its category.  Total over `u32`.
    pub fn classify(&self, duration_ms: u32) -> PressKind {
        if duration_ms < self.short_ms {
            PressKind::Short
        } else if duration_ms < self.medium_ms {
            PressKind::Medium
        } else if duration_ms < self.long_ms {
            PressKind::Long
        } else if duration_ms < self.long_long_ms {
            PressKind::LongLong
        } else {
            PressKind::Undefined
        }
    }
}

/// Classify with the default thresholds.
pub fn classify(duration_ms: u32) -> PressKind {
    PressThresholds::default().classify(duration_ms)
}

/// A classified press, handed to the user's [`PressHandler`](crate::ports::PressHandler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressEvent {
    pub line: LineId,
    pub kind: PressKind,
    pub duration_ms: u32,
}
