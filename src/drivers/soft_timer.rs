//! Clock-driven one-shot timer.
//!
//! For targets without a timer service, and for host simulation.  The
//! deadline is compared against a [`Clock`] on every query, so
//! [`is_active`](DeadlineTimer::is_active) turns false on its own once the
//! window passes.  Expiry is delivered by polling: the owner calls
//! [`SoftTimer::poll`] from its main loop and, when it returns `true`,
//! forwards to `Button::on_debounce_elapsed`.

use core::convert::Infallible;

use crate::ports::{Clock, DeadlineTimer};

pub struct SoftTimer<C> {
    clock: C,
    deadline_ms: Option<u32>,
}

impl<C: Clock> SoftTimer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            deadline_ms: None,
        }
    }

    /// Returns `true` exactly once per arming, on the first poll at or after
    /// the deadline.  A cancelled timer never reports expiry.
    pub fn poll(&mut self) -> bool {
        match self.deadline_ms {
            Some(deadline) if Self::reached(self.clock.now_ms(), deadline) => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Wrapping comparison: `now` is at or past `deadline` when the forward
    /// distance from `deadline` is under half the clock range.
    fn reached(now: u32, deadline: u32) -> bool {
        now.wrapping_sub(deadline) < u32::MAX / 2
    }
}

impl<C: Clock> DeadlineTimer for SoftTimer<C> {
    type Error = Infallible;

    fn schedule_after(&mut self, delay_ms: u32) -> Result<(), Infallible> {
        self.deadline_ms = Some(self.clock.now_ms().wrapping_add(delay_ms));
        Ok(())
    }

    fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    fn is_active(&self) -> bool {
        self.deadline_ms
            .is_some_and(|deadline| !Self::reached(self.clock.now_ms(), deadline))
    }
}
