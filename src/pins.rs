//! GPIO pin assignments for the reference board (ESP32-S3 DevKitC).
//!
//! Single source of truth for the firmware binary.  Change a pin here and it
//! propagates everywhere.

use crate::config::{LineId, Polarity};

/// BOOT button: momentary switch to ground, external 10 kΩ pull-up.
pub const BUTTON_GPIO: i32 = 0;
pub const BUTTON_LINE: LineId = LineId(BUTTON_GPIO);
pub const BUTTON_POLARITY: Polarity = Polarity::ActiveLow;
