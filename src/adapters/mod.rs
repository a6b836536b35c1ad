//! Adapters: concrete implementations of the port traits that are not
//! tied to a specific peripheral driver.
//!
//! | Adapter    | Implements     | Connects to                      |
//! |------------|----------------|----------------------------------|
//! | `log_sink` | PressHandler   | Serial log output                |
//! | `time`     | Clock          | ESP32 system timer / std Instant |

pub mod log_sink;
pub mod time;
