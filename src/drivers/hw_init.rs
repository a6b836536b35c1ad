//! GPIO bring-up and the ESP-IDF edge/input adapters for the button line.
//!
//! Configures the line as an input with the pull resistor its polarity
//! needs and any-edge interrupts, using raw ESP-IDF sys calls.  Called once
//! from `main()` before the button is started.
//!
//! - [`GpioLine`]: `embedded_hal::digital::InputPin` over `gpio_get_level`.
//! - [`GpioEdgeSource`]: [`EdgeSource`](crate::ports::EdgeSource) over the
//!   per-pin GPIO ISR service.  The ISR only posts a FreeRTOS task
//!   notification; the button runs in the woken task.

#[cfg(target_os = "espidf")]
use core::convert::Infallible;
#[cfg(target_os = "espidf")]
use core::ffi::c_void;
#[cfg(target_os = "espidf")]
use core::num::NonZeroU32;
#[cfg(target_os = "espidf")]
use std::sync::Arc;

#[cfg(target_os = "espidf")]
use embedded_hal::digital::{ErrorType, InputPin};
#[cfg(target_os = "espidf")]
use esp_idf_hal::task::notification::Notifier;
#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::config::{ButtonConfig, LineId};
#[cfg(target_os = "espidf")]
use crate::ports::EdgeSource;

// ── Error type ────────────────────────────────────────────────

/// Errors from GPIO bring-up and ISR registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    IsrHandlerFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrHandlerFailed(rc) => write!(f, "GPIO ISR handler add/remove failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

// ── GPIO input ────────────────────────────────────────────────

/// Configure the button line: input, pull per polarity, any-edge interrupt
/// (left disabled until the edge source registers).
#[cfg(target_os = "espidf")]
pub fn init_button_gpio(config: &ButtonConfig) -> Result<(), HwInitError> {
    let pin_bit_mask = u32::try_from(config.line.0)
        .ok()
        .and_then(|n| 1u64.checked_shl(n))
        .ok_or(HwInitError::GpioConfigFailed(ESP_ERR_INVALID_ARG as i32))?;
    let pull_up = config.polarity.pull_up();
    let cfg = gpio_config_t {
        pin_bit_mask,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: if pull_up {
            gpio_pullup_t_GPIO_PULLUP_ENABLE
        } else {
            gpio_pullup_t_GPIO_PULLUP_DISABLE
        },
        pull_down_en: if pull_up {
            gpio_pulldown_t_GPIO_PULLDOWN_DISABLE
        } else {
            gpio_pulldown_t_GPIO_PULLDOWN_ENABLE
        },
        intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
    };
    // SAFETY: Called once from main() before the button is started;
    // single-threaded, and the config struct outlives the call.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    // SAFETY: pin was configured just above.
    unsafe { gpio_intr_disable(config.line.0) };

    info!(
        "hw_init: {} input, pull-{}, any-edge",
        config.line,
        if pull_up { "up" } else { "down" }
    );
    Ok(())
}

/// Install the per-pin GPIO ISR service.  Idempotent.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: ESP_ERR_INVALID_STATE means it was already installed
    // (acceptable).
    let ret = unsafe { gpio_install_isr_service(0) };
    if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
        return Err(HwInitError::IsrInstallFailed(ret));
    }
    info!("hw_init: GPIO ISR service installed");
    Ok(())
}

/// Level reader for a configured input line.
#[cfg(target_os = "espidf")]
#[derive(Debug, Clone, Copy)]
pub struct GpioLine {
    line: LineId,
}

#[cfg(target_os = "espidf")]
impl GpioLine {
    pub fn new(line: LineId) -> Self {
        Self { line }
    }
}

#[cfg(target_os = "espidf")]
impl ErrorType for GpioLine {
    type Error = Infallible;
}

#[cfg(target_os = "espidf")]
impl InputPin for GpioLine {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        // SAFETY: gpio_get_level is a register read on a configured input;
        // safe in ISR context.
        Ok((unsafe { gpio_get_level(self.line.0) }) != 0)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

// ── GPIO ISR edge source ──────────────────────────────────────

/// Notification value posted by the ISR.  Pending edges OR into one wake-up.
#[cfg(target_os = "espidf")]
pub const EDGE_NOTIFY_BITS: NonZeroU32 = NonZeroU32::MIN;

/// GPIO interrupt handler.  Only wakes the edge task: no locks, no logging.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn edge_isr(arg: *mut c_void) {
    // SAFETY: `arg` is the `Notifier` held by the registering
    // `GpioEdgeSource`, which removes this handler before releasing it.
    let notifier = unsafe { &*(arg as *const Notifier) };
    // SAFETY: notify_and_yield takes the FreeRTOS FromISR path when called
    // in interrupt context.
    let _ = unsafe { notifier.notify_and_yield(EDGE_NOTIFY_BITS) };
}

/// Turns GPIO interrupts on a line into task notifications.
///
/// The task that owns the matching [`Notification`] waits on it and calls
/// `SharedButton::on_edge` once per wake-up.  Edges that land before the
/// task gets to run are coalesced; the button re-reads the line, so it
/// sees the latest level.
///
/// [`Notification`]: esp_idf_hal::task::notification::Notification
#[cfg(target_os = "espidf")]
pub struct GpioEdgeSource {
    notifier: Arc<Notifier>,
    registered: Option<LineId>,
}

#[cfg(target_os = "espidf")]
impl GpioEdgeSource {
    pub fn new(notifier: Arc<Notifier>) -> Self {
        Self {
            notifier,
            registered: None,
        }
    }
}

#[cfg(target_os = "espidf")]
impl EdgeSource for GpioEdgeSource {
    type Error = HwInitError;

    fn register(&mut self, line: LineId) -> Result<(), HwInitError> {
        let arg = Arc::as_ptr(&self.notifier).cast_mut().cast::<c_void>();
        // SAFETY: the ISR service is installed (init_isr_service).  `arg`
        // stays valid while registered: the Arc is only released in drop,
        // after the handler is removed.
        unsafe {
            let ret = gpio_isr_handler_add(line.0, Some(edge_isr), arg);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::IsrHandlerFailed(ret));
            }
            gpio_intr_enable(line.0);
        }
        self.registered = Some(line);
        info!("hw_init: {} edge ISR registered", line);
        Ok(())
    }

    fn deregister(&mut self, line: LineId) -> Result<(), HwInitError> {
        // SAFETY: disabling first guarantees the handler is not entered
        // again once removal returns.
        unsafe {
            gpio_intr_disable(line.0);
            let ret = gpio_isr_handler_remove(line.0);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::IsrHandlerFailed(ret));
            }
        }
        self.registered = None;
        info!("hw_init: {} edge ISR removed", line);
        Ok(())
    }
}

#[cfg(target_os = "espidf")]
impl Drop for GpioEdgeSource {
    fn drop(&mut self) {
        if let Some(line) = self.registered.take() {
            if let Err(e) = self.deregister(line) {
                log::warn!("hw_init: {} edge ISR removal on drop failed: {}", line, e);
            }
        }
    }
}
