//! Critical-section wrapper for a button reached from several contexts.
//!
//! The task woken by the GPIO ISR calls [`SharedButton::on_edge`]; the
//! debounce timer's callback calls [`SharedButton::on_debounce_elapsed`].
//! Both go through `critical_section::with`, so the two paths never run
//! concurrently on the same instance, which is the one guarantee the state
//! machine relies on.
//!
//! ```ignore
//! static BUTTON: SharedButton<MyButton> = SharedButton::new();
//!
//! loop {
//!     if edge_notification.wait(wait_ticks).is_some() {
//!         BUTTON.on_edge();
//!     }
//! }
//! ```
//!
//! Call these from task context.  On ESP-IDF the `critical-section`
//! implementation is a FreeRTOS mutex, which an interrupt handler must not
//! take.
//!
//! The press handler runs inside the critical section.  It must not touch
//! the same `SharedButton` again (the inner `RefCell` would panic).

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::digital::InputPin;
use log::trace;

use crate::drivers::button::Button;
use crate::ports::{Clock, DeadlineTimer, PressHandler};

pub struct SharedButton<B> {
    inner: Mutex<RefCell<Option<B>>>,
}

impl<B> Default for SharedButton<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> SharedButton<B> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Put a button in place.  Returns the one it replaces, if any.
    pub fn install(&self, button: B) -> Option<B> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(button))
    }

    /// Remove the button; later notifications become no-ops.
    pub fn take(&self) -> Option<B> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Run `f` with exclusive access.  `None` when nothing is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut B) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }
}

impl<P, T, C, H> SharedButton<Button<P, T, C, H>>
where
    P: InputPin,
    T: DeadlineTimer,
    C: Clock,
    H: PressHandler,
{
    pub fn on_edge(&self) {
        if self.with(Button::on_edge).is_none() {
            trace!("shared button: edge before install");
        }
    }

    pub fn on_debounce_elapsed(&self) {
        if self.with(Button::on_debounce_elapsed).is_none() {
            trace!("shared button: timer expiry before install");
        }
    }
}
