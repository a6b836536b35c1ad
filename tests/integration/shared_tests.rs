//! Integration tests: ISR-style dispatch through `SharedButton`, a
//! clock-driven `SoftTimer`, and the `PressQueue` hand-off to a main loop.

use pressbutton::drivers::button::Button;
use pressbutton::drivers::soft_timer::SoftTimer;
use pressbutton::events::PressQueue;
use pressbutton::shared::SharedButton;
use pressbutton::{ButtonConfig, Polarity, PressKind};

use crate::mock_hw::{MockClock, MockEdges, MockLine, LINE};

#[test]
fn isr_and_timer_paths_through_shared_button() {
    let line = MockLine::default();
    line.set(true);
    let clock = MockClock::default();
    let mut queue = PressQueue::<4>::new();
    let (sender, mut receiver) = queue.split();

    let mut button = Button::init(
        ButtonConfig::new(LINE, Polarity::ActiveLow),
        line.clone(),
        SoftTimer::new(clock.clone()),
        clock.clone(),
        sender,
    )
    .unwrap();
    let mut edges = MockEdges::default();
    button.start(&mut edges).unwrap();

    let shared = SharedButton::new();
    assert!(shared.install(button).is_none());

    // "ISR": contacts close.
    line.set(false);
    shared.on_edge();
    assert_eq!(shared.with(|b| b.is_debouncing()), Some(true));

    // Timer task: poll past the window and deliver expiry.
    clock.advance(5);
    let fired = shared.with(|b| b.timer_mut().poll()).unwrap();
    assert!(fired);
    shared.on_debounce_elapsed();
    assert_eq!(shared.with(|b| b.is_debouncing()), Some(false));

    // "ISR": contacts open 250 ms after the press.
    clock.advance(245);
    line.set(true);
    shared.on_edge();

    // Main loop drains the queue.
    let event = receiver.recv().expect("press queued");
    assert_eq!(event.kind, PressKind::Medium);
    assert_eq!(event.duration_ms, 250);
    assert!(receiver.is_empty());

    let mut button = shared.take().unwrap();
    button.stop(&mut edges);
    assert!(edges.registered.is_empty());
}

#[test]
fn soft_timer_window_rejects_fast_bounce() {
    let line = MockLine::default();
    line.set(true);
    let clock = MockClock::default();
    let mut queue = PressQueue::<4>::new();
    let (sender, mut receiver) = queue.split();

    let mut button = Button::init(
        ButtonConfig::new(LINE, Polarity::ActiveLow).with_debounce_ms(10),
        line.clone(),
        SoftTimer::new(clock.clone()),
        clock.clone(),
        sender,
    )
    .unwrap();
    button.start(&mut MockEdges::default()).unwrap();

    line.set(false);
    button.on_edge();
    clock.advance(3);
    line.set(true);
    button.on_edge(); // inside the 10 ms window

    assert_eq!(button.stats().bounces, 1);
    assert_eq!(button.press_start_ms(), None);
    assert!(receiver.recv().is_none());
}

#[test]
fn coalesced_wakeups_handle_the_latest_level() {
    let line = MockLine::default();
    line.set(true);
    let clock = MockClock::default();
    let mut queue = PressQueue::<4>::new();
    let (sender, mut receiver) = queue.split();

    let mut button = Button::init(
        ButtonConfig::new(LINE, Polarity::ActiveLow),
        line.clone(),
        SoftTimer::new(clock.clone()),
        clock.clone(),
        sender,
    )
    .unwrap();
    button.start(&mut MockEdges::default()).unwrap();
    let shared = SharedButton::new();
    shared.install(button);

    // Close and reopen before the edge task runs: one wake-up, line high.
    line.set(false);
    line.set(true);
    clock.advance(40);
    shared.on_edge();
    assert_eq!(shared.with(|b| b.stats().duplicates), Some(1));
    assert_eq!(shared.with(|b| b.press_start_ms()), Some(None));

    // Close, open, close again: the task sees a press.
    line.set(false);
    line.set(true);
    line.set(false);
    shared.on_edge();
    assert_eq!(shared.with(|b| b.press_start_ms()), Some(Some(40)));

    clock.advance(500);
    assert!(shared.with(|b| b.timer_mut().poll()).unwrap());
    shared.on_debounce_elapsed();
    line.set(true);
    shared.on_edge();

    let event = receiver.recv().expect("press queued");
    assert_eq!(event.kind, PressKind::Medium);
    assert_eq!(event.duration_ms, 500);
}

#[test]
fn notifications_before_install_are_dropped() {
    let shared: SharedButton<Button<MockLine, SoftTimer<MockClock>, MockClock, fn(pressbutton::PressEvent)>> =
        SharedButton::new();
    shared.on_edge();
    shared.on_debounce_elapsed();
    assert!(!shared.is_installed());
}
