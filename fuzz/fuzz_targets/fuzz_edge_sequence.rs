//! Fuzz target: `Button` edge/expiry handling
//!
//! Each input byte is one step against a button wired to a soft timer:
//! - bit 7 clear: advance the clock by `byte & 0x3f` ms, drive the line to
//!   bit 6, and deliver an edge notification
//! - bit 7 set: poll the timer and deliver expiry if it fired
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Every reported press is classified from its own duration
//! - Callbacks equal the `presses` counter
//! - An active debounce window always has a press being timed
//!
//! cargo fuzz run fuzz_edge_sequence

#![no_main]

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use libfuzzer_sys::fuzz_target;
use pressbutton::drivers::button::Button;
use pressbutton::drivers::soft_timer::SoftTimer;
use pressbutton::ports::{Clock, EdgeSource, PressHandler};
use pressbutton::{classify, ButtonConfig, LineId, Polarity, PressEvent};

struct FuzzClock(Cell<u32>);

impl Clock for FuzzClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

struct FuzzPin<'a>(&'a Cell<bool>);

impl ErrorType for FuzzPin<'_> {
    type Error = Infallible;
}

impl InputPin for FuzzPin<'_> {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

struct NoEdges;

impl EdgeSource for NoEdges {
    type Error = Infallible;

    fn register(&mut self, _line: LineId) -> Result<(), Infallible> {
        Ok(())
    }

    fn deregister(&mut self, _line: LineId) -> Result<(), Infallible> {
        Ok(())
    }
}

#[derive(Default)]
struct Tally {
    count: u32,
}

impl PressHandler for Tally {
    fn on_press(&mut self, event: PressEvent) {
        assert_eq!(event.kind, classify(event.duration_ms));
        self.count += 1;
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&first, steps)) = data.split_first() else {
        return;
    };

    let polarity = if first & 1 == 0 {
        Polarity::ActiveLow
    } else {
        Polarity::ActiveHigh
    };
    let level = Cell::new(first & 2 != 0);
    let clock = FuzzClock(Cell::new(u32::from(first) << 24));

    let Ok(mut button) = Button::init(
        ButtonConfig::new(LineId(0), polarity),
        FuzzPin(&level),
        SoftTimer::new(&clock),
        &clock,
        Tally::default(),
    ) else {
        return;
    };
    if button.start(&mut NoEdges).is_err() {
        return;
    }

    for &step in steps {
        if step & 0x80 == 0 {
            clock.0.set(clock.0.get().wrapping_add(u32::from(step & 0x3f)));
            level.set(step & 0x40 != 0);
            button.on_edge();
        } else if button.timer_mut().poll() {
            button.on_debounce_elapsed();
        }

        if button.is_debouncing() {
            assert!(button.press_start_ms().is_some());
        }
    }

    assert_eq!(button.handler().count, button.stats().presses);
    button.stop(&mut NoEdges);
});
