//! Log-based press handler.
//!
//! Writes each classified press to the logger (UART / USB-CDC in
//! production).  Not ISR-safe on ESP-IDF: use it from the main loop on
//! events drained from a [`PressQueue`](crate::events::PressQueue), not as
//! the button's direct handler.

use log::{info, warn};

use crate::ports::PressHandler;
use crate::press::{PressEvent, PressKind};

#[derive(Debug, Default)]
pub struct LogPressSink {
    logged: u32,
}

impl LogPressSink {
    pub fn new() -> Self {
        Self { logged: 0 }
    }

    pub fn logged(&self) -> u32 {
        self.logged
    }
}

impl PressHandler for LogPressSink {
    fn on_press(&mut self, event: PressEvent) {
        self.logged = self.logged.saturating_add(1);
        match event.kind {
            PressKind::Undefined => warn!(
                "PRESS | {} | held {}ms, past the last threshold",
                event.line, event.duration_ms
            ),
            kind => info!("PRESS | {} | {} ({}ms)", event.line, kind, event.duration_ms),
        }
    }
}
