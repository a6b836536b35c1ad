//! System time adapter.
//!
//! - **`target_os = "espidf"`** wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//!   Callable from ISR context.
//! - **`not(target_os = "espidf")`** uses `std::time::Instant` for
//!   host-side simulation.

use crate::ports::Clock;

/// Monotonic milliseconds since boot, truncated to `u32`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    #[cfg(target_os = "espidf")]
    fn now_ms(&self) -> u32 {
        // SAFETY: esp_timer_get_time reads the RTC-backed counter; no
        // preconditions, safe in ISR context.
        ((unsafe { esp_idf_svc::sys::esp_timer_get_time() }) / 1_000) as u32
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}
