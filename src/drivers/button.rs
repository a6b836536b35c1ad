//! Interrupt-driven button driver with press-duration classification.
//!
//! ## Hardware
//!
//! A momentary switch on one GPIO line, either to ground with a pull-up
//! ([`Polarity::ActiveLow`]) or to VCC with a pull-down
//! ([`Polarity::ActiveHigh`]).  Every edge notification ends in
//! [`Button::on_edge`]; the debounce timer's expiry calls
//! [`Button::on_debounce_elapsed`].  Nothing polls the line.
//!
//! ## State
//!
//! The machine has no explicit state tag.  It is encoded by the last
//! observed edge plus the debounce timer:
//!
//! | last edge        | timer  | meaning                                  |
//! |------------------|--------|------------------------------------------|
//! | `Unknown`        | idle   | not started                              |
//! | press direction  | armed  | press seen, waiting for contacts to settle |
//! | press direction  | idle   | held                                     |
//! | release direction| idle   | released / idle                          |
//!
//! An edge that arrives while the timer is armed is contact bounce: the
//! timer is cancelled, the pending press is forgotten, and no callback runs.
//!
//! ## Concurrency
//!
//! Every mutating entry point takes `&mut self`; the driver does no locking
//! of its own.  When edge delivery and the timer callback run in different
//! tasks, put the button in a [`SharedButton`](crate::shared::SharedButton),
//! which serializes both paths with a critical section.  The entry points
//! log, so they belong in task context, not in a raw interrupt handler.

use embedded_hal::digital::InputPin;
use log::{debug, error, info, trace, warn};

use crate::config::ButtonConfig;
use crate::error::{Error, Result};
use crate::ports::{Clock, DeadlineTimer, EdgeSource, PressHandler};
use crate::press::PressEvent;
use crate::signal::{direction_meaning, sample_level, Edge, EdgeMeaning};

#[cfg(doc)]
use crate::config::Polarity;

/// Counters for diagnostics.  Saturating; never reset while running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonStats {
    /// Classified press/release cycles delivered to the handler.
    pub presses: u32,
    /// Edges that arrived inside the debounce window.
    pub bounces: u32,
    /// Notifications whose direction matched the previous edge.
    pub duplicates: u32,
    /// Releases with no recorded press start (suppressed).
    pub orphan_releases: u32,
    /// Edge notifications dropped because the line could not be read.
    pub read_errors: u32,
    /// Presses timed without a debounce window because arming failed.
    pub arm_failures: u32,
}

pub struct Button<P, T, C, H> {
    config: ButtonConfig,
    pin: P,
    timer: T,
    clock: C,
    handler: H,
    last_edge: Edge,
    /// `None` while idle.
    press_start_ms: Option<u32>,
    last_press: Option<PressEvent>,
    stats: ButtonStats,
    started: bool,
}

impl<P, T, C, H> Button<P, T, C, H>
where
    P: InputPin,
    T: DeadlineTimer,
    C: Clock,
    H: PressHandler,
{
    /// Validate `config` and build an idle, unregistered button.
    ///
    /// The timer must already be bound to call [`on_debounce_elapsed`]
    /// for this instance; it is left disarmed.
    ///
    /// [`on_debounce_elapsed`]: Self::on_debounce_elapsed
    pub fn init(config: ButtonConfig, pin: P, mut timer: T, clock: C, handler: H) -> Result<Self> {
        if let Err(e) = config.validate() {
            error!("button {}: invalid config: {}", config.line, e);
            return Err(e.into());
        }
        timer.cancel();

        info!(
            "button {}: init ({:?}, debounce={}ms, samples={})",
            config.line, config.polarity, config.debounce_ms, config.sample_count
        );

        Ok(Self {
            config,
            pin,
            timer,
            clock,
            handler,
            last_edge: Edge::Unknown,
            press_start_ms: None,
            last_press: None,
            stats: ButtonStats::default(),
            started: false,
        })
    }

    /// Seed the edge tracker from the current line level and register for
    /// edge notifications.
    ///
    /// A button already held at this point is treated as pressed now: the
    /// press start is recorded and the debounce timer armed.  The press
    /// handler is never called from here.
    pub fn start<E: EdgeSource>(&mut self, edges: &mut E) -> Result<()> {
        if self.started {
            warn!("button {}: start while already started", self.config.line);
            return Err(Error::AlreadyStarted);
        }

        let level = sample_level(&mut self.pin, self.config.sample_count).map_err(|e| {
            warn!("button {}: initial read failed: {:?}", self.config.line, e);
            Error::InputRead
        })?;
        self.last_edge = Edge::from_level(level);

        if direction_meaning(self.config.polarity, self.last_edge) == Some(EdgeMeaning::Press) {
            debug!("button {}: already held at start", self.config.line);
            self.press_start_ms = Some(self.clock.now_ms());
            if let Err(e) = self.arm_debounce() {
                self.reset_tracking();
                return Err(e);
            }
        }

        if let Err(e) = edges.register(self.config.line) {
            error!("button {}: edge registration failed: {:?}", self.config.line, e);
            self.timer.cancel();
            self.reset_tracking();
            return Err(Error::EdgeRegister);
        }

        self.started = true;
        info!("button {}: started (line {})", self.config.line, if level { "high" } else { "low" });
        Ok(())
    }

    /// Disarm the debounce timer and deregister from the edge source.
    ///
    /// Edge notifications that still arrive afterwards are ignored.  Tracking
    /// state is cleared so a later [`start`](Self::start) re-seeds from the
    /// line.  Safe to call at any time, including twice.
    pub fn stop<E: EdgeSource>(&mut self, edges: &mut E) {
        self.timer.cancel();
        if self.started {
            if let Err(e) = edges.deregister(self.config.line) {
                warn!("button {}: edge deregistration failed: {:?}", self.config.line, e);
            }
            info!("button {}: stopped", self.config.line);
        }
        self.started = false;
        self.reset_tracking();
    }

    /// Edge notification entry point.
    ///
    /// Must not run concurrently with [`on_debounce_elapsed`](Self::on_debounce_elapsed).
    /// On ESP-IDF the GPIO ISR only wakes a task, and the task calls this.
    ///
    /// When the debounce timer cannot be armed for a press, the press is
    /// still timed from this edge, but bounce rejection is off until the
    /// next press: a bouncing release ends it early.  Such presses are
    /// counted in [`ButtonStats::arm_failures`].
    pub fn on_edge(&mut self) {
        if !self.started {
            trace!("button {}: edge while stopped, ignored", self.config.line);
            return;
        }

        let level = match sample_level(&mut self.pin, self.config.sample_count) {
            Ok(level) => level,
            Err(e) => {
                self.stats.read_errors = self.stats.read_errors.saturating_add(1);
                warn!("button {}: read failed, edge dropped: {:?}", self.config.line, e);
                return;
            }
        };
        let edge = Edge::from_level(level);

        // Same direction twice: either a repeated notification or two edges
        // that collapsed into one read.  Indistinguishable, so dropped.
        if edge == self.last_edge {
            self.stats.duplicates = self.stats.duplicates.saturating_add(1);
            trace!("button {}: duplicate {:?}", self.config.line, edge);
            return;
        }
        self.last_edge = edge;

        if self.timer.is_active() {
            self.timer.cancel();
            self.press_start_ms = None;
            self.stats.bounces = self.stats.bounces.saturating_add(1);
            trace!("button {}: bounce ({:?}), pending press dropped", self.config.line, edge);
        } else {
            match direction_meaning(self.config.polarity, edge) {
                Some(EdgeMeaning::Release) => self.finish_press(),
                Some(EdgeMeaning::Press) => {
                    self.press_start_ms = Some(self.clock.now_ms());
                    trace!("button {}: press", self.config.line);
                    if self.arm_debounce().is_err() {
                        // Still timed, but with no window to reject bounce: the
                        // first contact bounce ends this press as a near-zero
                        // short press.
                        self.stats.arm_failures = self.stats.arm_failures.saturating_add(1);
                    }
                }
                None => {}
            }
        }
    }

    /// Debounce timer expiry entry point.
    ///
    /// The timer only marks "edge pending confirmation" through
    /// [`DeadlineTimer::is_active`]; the press/release decision taken in
    /// [`on_edge`](Self::on_edge) simply stands.
    pub fn on_debounce_elapsed(&mut self) {
        trace!("button {}: debounce window elapsed", self.config.line);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn last_edge(&self) -> Edge {
        self.last_edge
    }

    /// Timestamp of the press being timed, if any.
    pub fn press_start_ms(&self) -> Option<u32> {
        self.press_start_ms
    }

    /// A press edge is waiting out the debounce window.
    pub fn is_debouncing(&self) -> bool {
        self.timer.is_active()
    }

    pub fn last_press(&self) -> Option<PressEvent> {
        self.last_press
    }

    pub fn stats(&self) -> ButtonStats {
        self.stats
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Poll-driven timers (e.g. [`SoftTimer`](crate::drivers::soft_timer::SoftTimer))
    /// are serviced through this.
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    // ── Internal ──────────────────────────────────────────────

    fn arm_debounce(&mut self) -> Result<()> {
        self.timer.schedule_after(self.config.debounce_ms).map_err(|e| {
            warn!("button {}: debounce timer arm failed: {:?}", self.config.line, e);
            Error::TimerArm
        })
    }

    fn finish_press(&mut self) {
        // Edges alternate and a bounce leaves the release direction
        // recorded, so a release always follows a press that recorded its
        // start.  Should that ever break, the release is counted and not
        // timed from zero.
        let Some(start) = self.press_start_ms.take() else {
            self.stats.orphan_releases = self.stats.orphan_releases.saturating_add(1);
            debug!("button {}: release without press start, suppressed", self.config.line);
            return;
        };

        let duration_ms = self.clock.now_ms().wrapping_sub(start);
        let event = PressEvent {
            line: self.config.line,
            kind: self.config.thresholds.classify(duration_ms),
            duration_ms,
        };
        self.last_press = Some(event);
        self.stats.presses = self.stats.presses.saturating_add(1);
        debug!("button {}: {} press ({}ms)", self.config.line, event.kind, duration_ms);
        self.handler.on_press(event);
    }

    fn reset_tracking(&mut self) {
        self.last_edge = Edge::Unknown;
        self.press_start_ms = None;
    }
}
