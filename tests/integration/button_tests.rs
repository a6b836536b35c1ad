//! Integration tests: edge notifications → Button → press handler.

use pressbutton::signal::Edge;
use pressbutton::{
    Button, ButtonConfig, ConfigError, Error, LineId, Polarity, PressKind, PressThresholds,
};

use crate::mock_hw::{MockClock, MockLine, MockTimer, Recorder, Rig, LINE};

// ── Complete press/release cycles ─────────────────────────────

#[test]
fn short_press_active_low() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    rig.press_at(0);
    assert!(rig.timer.armed());
    assert_eq!(rig.timer.last_delay_ms(), 5);
    rig.settle();
    rig.release_at(150);

    let events = rig.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].line, LINE);
    assert_eq!(events[0].kind, PressKind::Short);
    assert_eq!(events[0].duration_ms, 150);
}

#[test]
fn eight_hundred_ms_is_long() {
    // [700, 2000) is the long band.
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    rig.press_at(0);
    rig.settle();
    rig.release_at(800);

    let events = rig.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, PressKind::Long);
    assert_eq!(events[0].duration_ms, 800);
}

#[test]
fn active_high_long_long_press() {
    let mut rig = Rig::new(Polarity::ActiveHigh);
    rig.start();
    assert_eq!(rig.button.last_edge(), Edge::Falling);

    rig.press_at(1000);
    assert_eq!(rig.button.last_edge(), Edge::Rising);
    rig.settle();
    rig.release_at(3500);

    let events = rig.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, PressKind::LongLong);
    assert_eq!(events[0].duration_ms, 2500);
}

#[test]
fn stuck_button_is_undefined() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    rig.press_at(0);
    rig.settle();
    rig.release_at(7000);

    assert_eq!(rig.events()[0].kind, PressKind::Undefined);
    assert_eq!(rig.button.last_press().map(|e| e.duration_ms), Some(7000));
}

#[test]
fn consecutive_presses_each_reported_once() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    for (press, release) in [(0, 100), (500, 900), (2000, 4500)] {
        rig.press_at(press);
        rig.settle();
        rig.release_at(release);
    }

    let kinds: Vec<_> = rig.events().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [PressKind::Short, PressKind::Medium, PressKind::LongLong]);
    assert_eq!(rig.button.stats().presses, 3);
    assert_eq!(rig.button.press_start_ms(), None);
}

#[test]
fn custom_thresholds_apply() {
    let cfg = ButtonConfig::new(LINE, Polarity::ActiveLow).with_thresholds(PressThresholds {
        short_ms: 50,
        medium_ms: 100,
        long_ms: 1000,
        long_long_ms: 3000,
    });
    let mut rig = Rig::with_config(cfg);
    rig.start();

    rig.press_at(0);
    rig.settle();
    rig.release_at(150);

    assert_eq!(rig.events()[0].kind, PressKind::Long);
}

// ── Noise handling ────────────────────────────────────────────

#[test]
fn duplicate_notification_is_discarded() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    rig.press_at(0);
    rig.press_at(3);

    assert!(rig.timer.armed());
    assert_eq!(rig.timer.schedules(), 1);
    assert_eq!(rig.button.press_start_ms(), Some(0));
    assert_eq!(rig.button.last_edge(), Edge::Falling);
    assert_eq!(rig.button.stats().duplicates, 1);
    assert!(rig.events().is_empty());
}

#[test]
fn duplicate_release_yields_single_callback() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    rig.press_at(0);
    rig.settle();
    rig.release_at(400);
    rig.release_at(410);

    assert_eq!(rig.events().len(), 1);
}

#[test]
fn edge_inside_debounce_window_is_bounce() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    rig.press_at(0);
    let cancels_before = rig.timer.cancels();
    rig.release_at(2);

    assert!(!rig.timer.armed());
    assert_eq!(rig.timer.cancels(), cancels_before + 1);
    assert_eq!(rig.button.press_start_ms(), None);
    assert_eq!(rig.button.last_edge(), Edge::Rising);
    assert_eq!(rig.button.stats().bounces, 1);
    assert!(rig.events().is_empty());
}

#[test]
fn press_after_bounce_restarts_timing() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    rig.press_at(0);
    rig.release_at(2); // bounce
    rig.press_at(4); // contacts close again
    assert_eq!(rig.button.press_start_ms(), Some(4));
    rig.settle();
    rig.release_at(300);

    let events = rig.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].duration_ms, 296);
    assert_eq!(events[0].kind, PressKind::Medium);
}

#[test]
fn release_after_bounce_is_a_duplicate() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    rig.press_at(0);
    rig.release_at(2); // bounce: pending press dropped
    rig.release_at(3); // same direction again

    let stats = rig.button.stats();
    assert_eq!(stats.bounces, 1);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.orphan_releases, 0);
    assert!(rig.events().is_empty());
}

#[test]
fn unstable_line_reads_as_complement() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    // Edge reported low, but one confirmation sample is still high: the
    // sampler distrusts the report and returns high, a duplicate Rising.
    rig.line.set(false);
    rig.line.glitch(&[false, false, true]);
    rig.button.on_edge();

    assert_eq!(rig.button.last_edge(), Edge::Rising);
    assert_eq!(rig.button.press_start_ms(), None);
    assert!(!rig.timer.armed());
    assert_eq!(rig.button.stats().duplicates, 1);
}

#[test]
fn read_error_drops_notification() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    rig.line.fail_reads(true);
    rig.press_at(0);

    assert_eq!(rig.button.stats().read_errors, 1);
    assert_eq!(rig.button.last_edge(), Edge::Rising);
    assert!(!rig.timer.armed());

    // Line recovers; the next edge is handled normally.
    rig.line.fail_reads(false);
    rig.press_at(10);
    assert_eq!(rig.button.press_start_ms(), Some(10));
}

#[test]
fn arm_failure_still_times_press() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    rig.timer.fail_schedule(true);
    rig.press_at(0);
    assert!(!rig.timer.armed());
    rig.release_at(150);

    let events = rig.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].duration_ms, 150);
    assert_eq!(rig.button.stats().arm_failures, 1);
}

#[test]
fn arm_failure_leaves_press_open_to_bounce() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    rig.timer.fail_schedule(true);
    rig.press_at(0);
    rig.release_at(2); // contact bounce, nothing to reject it

    let events = rig.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, PressKind::Short);
    assert_eq!(events[0].duration_ms, 2);
    assert_eq!(rig.button.stats().bounces, 0);
    assert_eq!(rig.button.stats().arm_failures, 1);
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn unconnected_line_is_rejected_at_init() {
    for n in [-1, 200] {
        let res = Button::init(
            ButtonConfig::new(LineId(n), Polarity::ActiveLow),
            MockLine::default(),
            MockTimer::default(),
            MockClock::default(),
            Recorder::default(),
        );
        assert!(matches!(res, Err(Error::Config(ConfigError::InvalidLine(m))) if m == n));
    }
}

#[test]
fn start_released_does_not_arm() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();

    assert!(rig.button.is_started());
    assert_eq!(rig.edges.registered, [LINE]);
    assert_eq!(rig.button.last_edge(), Edge::Rising);
    assert_eq!(rig.button.press_start_ms(), None);
    assert!(!rig.timer.armed());
}

#[test]
fn start_while_held_prearms() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.clock.set(1000);
    rig.line.set(false);
    rig.start();

    assert!(rig.timer.armed());
    assert_eq!(rig.button.press_start_ms(), Some(1000));
    assert_eq!(rig.button.last_edge(), Edge::Falling);
    assert!(rig.events().is_empty());

    rig.settle();
    rig.release_at(1900);
    let events = rig.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, PressKind::Long);
    assert_eq!(events[0].duration_ms, 900);
}

#[test]
fn start_samples_the_line() {
    let mut rig = Rig::new(Polarity::ActiveHigh);
    rig.start();
    // One reported read plus the default five confirmation samples.
    assert_eq!(rig.line.reads(), 6);
}

#[test]
fn start_read_failure_is_reported() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.line.fail_reads(true);
    assert_eq!(rig.button.start(&mut rig.edges), Err(Error::InputRead));
    assert!(!rig.button.is_started());
    assert_eq!(rig.edges.register_calls, 0);
}

#[test]
fn rejected_registration_unwinds() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.line.set(false); // held, so start arms the timer
    rig.edges.reject = true;

    assert_eq!(rig.button.start(&mut rig.edges), Err(Error::EdgeRegister));
    assert!(!rig.button.is_started());
    assert!(!rig.timer.armed());
    assert_eq!(rig.button.press_start_ms(), None);
    assert_eq!(rig.button.last_edge(), Edge::Unknown);
}

#[test]
fn stop_cancels_and_deregisters() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();
    rig.press_at(0);
    assert!(rig.timer.armed());

    rig.stop();

    assert!(!rig.timer.armed());
    assert!(rig.edges.registered.is_empty());
    assert_eq!(rig.edges.deregister_calls, 1);
    assert!(!rig.button.is_started());
    assert_eq!(rig.button.last_edge(), Edge::Unknown);
    assert_eq!(rig.button.press_start_ms(), None);

    // Late interrupt after stop is inert.
    rig.release_at(100);
    assert!(rig.events().is_empty());
    assert_eq!(rig.button.last_edge(), Edge::Unknown);

    // Second stop is harmless and does not deregister again.
    rig.stop();
    assert_eq!(rig.edges.deregister_calls, 1);
}

#[test]
fn restart_after_stop() {
    let mut rig = Rig::new(Polarity::ActiveLow);
    rig.start();
    rig.stop();
    rig.start();
    assert_eq!(rig.edges.register_calls, 2);

    rig.press_at(5000);
    rig.settle();
    rig.release_at(5100);
    assert_eq!(rig.events().len(), 1);
    assert_eq!(rig.events()[0].duration_ms, 100);
}
