//! Debounce timer on ESP-IDF's esp_timer service.
//!
//! [`EspDeadlineTimer`] wraps an `EspTimer` whose callback is a typed
//! closure supplied at construction, typically
//! `|| BUTTON.on_debounce_elapsed()` for a
//! [`SharedButton`](crate::shared::SharedButton) static.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR).  Arming
//! and cancelling happen in the edge task, which may log on failure.
//!
//! On simulation targets use [`SoftTimer`](super::soft_timer::SoftTimer).

#[cfg(target_os = "espidf")]
use core::time::Duration;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::EspError;
#[cfg(target_os = "espidf")]
use esp_idf_svc::timer::{EspTaskTimerService, EspTimer};

#[cfg(target_os = "espidf")]
use crate::ports::DeadlineTimer;

#[cfg(target_os = "espidf")]
pub struct EspDeadlineTimer {
    timer: EspTimer<'static>,
}

#[cfg(target_os = "espidf")]
impl EspDeadlineTimer {
    /// Create a one-shot timer that runs `on_expiry` each time it elapses.
    pub fn new<F>(service: &EspTaskTimerService, on_expiry: F) -> Result<Self, EspError>
    where
        F: FnMut() + Send + 'static,
    {
        let timer = service.timer(on_expiry)?;
        log::info!("hw_timer: debounce timer created");
        Ok(Self { timer })
    }
}

#[cfg(target_os = "espidf")]
impl DeadlineTimer for EspDeadlineTimer {
    type Error = EspError;

    fn schedule_after(&mut self, delay_ms: u32) -> Result<(), EspError> {
        // esp_timer_start_once rejects an already-armed timer.
        if self.timer.is_scheduled()? {
            self.timer.cancel()?;
        }
        self.timer.after(Duration::from_millis(delay_ms.into()))
    }

    fn cancel(&mut self) {
        if let Err(e) = self.timer.cancel() {
            log::warn!("hw_timer: cancel failed: {}", e);
        }
    }

    fn is_active(&self) -> bool {
        self.timer.is_scheduled().unwrap_or(false)
    }
}
