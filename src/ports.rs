//! Port traits: the boundary between the button state machine and the
//! platform it runs on.
//!
//! ```text
//!   GPIO edge ─▶ EdgeSource ──▶ Button::on_edge ──▶ PressHandler
//!                                  │    ▲
//!                    InputPin ◀────┘    └──── DeadlineTimer expiry
//! ```
//!
//! The digital input reader is `embedded_hal::digital::InputPin`; the
//! remaining collaborators are defined here.  Adapters implement them
//! (`drivers::hw_timer`, `drivers::hw_init`, `drivers::soft_timer`,
//! `adapters::time`) and the test harness mocks them.

use core::fmt::Debug;

use crate::config::LineId;
use crate::press::PressEvent;

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond time source.  Wraps at `u32::MAX`; callers
/// compare timestamps with `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

// ───────────────────────────────────────────────────────────────
// Deadline timer
// ───────────────────────────────────────────────────────────────

/// One-shot delay scheduler owned by a single button.
///
/// The expiry callback is bound when the adapter is constructed (a typed
/// closure or a poll loop), never through an untyped context pointer.  It
/// must end up calling [`Button::on_debounce_elapsed`] for the owning
/// instance.
///
/// All three methods are called from the edge handler's context.
///
/// [`Button::on_debounce_elapsed`]: crate::drivers::button::Button::on_debounce_elapsed
pub trait DeadlineTimer {
    type Error: Debug;

    /// Arm (or re-arm) the timer to expire `delay_ms` from now.
    fn schedule_after(&mut self, delay_ms: u32) -> Result<(), Self::Error>;

    /// Disarm.  No-op when not armed.
    fn cancel(&mut self);

    /// Armed and not yet expired.
    fn is_active(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Edge notification source
// ───────────────────────────────────────────────────────────────

/// Interrupt-driven transition notifier for a GPIO line.
///
/// Once registered, every transition of `line` must result in exactly one
/// call to [`Button::on_edge`](crate::drivers::button::Button::on_edge) for
/// the owning instance, serialized with the timer expiry path.
pub trait EdgeSource {
    type Error: Debug;

    fn register(&mut self, line: LineId) -> Result<(), Self::Error>;

    fn deregister(&mut self, line: LineId) -> Result<(), Self::Error>;
}

// ───────────────────────────────────────────────────────────────
// Press handler
// ───────────────────────────────────────────────────────────────

/// User callback for classified presses.  `self` is the callback context.
///
/// Called from the edge handler, which may be latency-sensitive:
/// implementations must not block.
pub trait PressHandler {
    fn on_press(&mut self, event: PressEvent);
}

impl<F: FnMut(PressEvent)> PressHandler for F {
    fn on_press(&mut self, event: PressEvent) {
        self(event);
    }
}
