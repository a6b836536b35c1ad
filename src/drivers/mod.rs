//! The button state machine and its peripheral-facing adapters.

pub mod button;
pub mod hw_init;
pub mod hw_timer;
pub mod soft_timer;
