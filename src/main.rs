//! PressButton firmware entry point.
//!
//! One button on `pins::BUTTON_GPIO`, classified by press duration.
//!
//! ```text
//! ┌───────────┐ ISR: notify ┌────────────────────────────┐ enqueue ┌────────────┐
//! │ GPIO edge │────────────▶│ main task                  │────────▶│ PressQueue │
//! └───────────┘             │ SharedButton::on_edge      │         └─────┬──────┘
//!                           └────────────────────────────┘               │ drain
//! ┌───────────┐ timer task  ┌────────────────────────────┐        ┌──────▼──────┐
//! │ esp_timer │────────────▶│ SharedButton::on_debounce_ │        │  main task  │
//! └───────────┘             │ elapsed                    │        │ LogPressSink│
//!                           └────────────────────────────┘        └─────────────┘
//! ```
//!
//! Nothing but the task notification runs in interrupt context.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::TickType;
use esp_idf_hal::task::notification::Notification;
use esp_idf_svc::timer::EspTaskTimerService;
use log::info;

use pressbutton::adapters::log_sink::LogPressSink;
use pressbutton::adapters::time::SystemClock;
use pressbutton::drivers::button::Button;
use pressbutton::drivers::hw_init::{self, GpioEdgeSource, GpioLine};
use pressbutton::drivers::hw_timer::EspDeadlineTimer;
use pressbutton::events::{PressQueue, PressSender};
use pressbutton::pins;
use pressbutton::ports::{Clock, PressHandler};
use pressbutton::shared::SharedButton;
use pressbutton::ButtonConfig;

/// Queue depth; holds `PRESS_QUEUE_LEN - 1` events.
const PRESS_QUEUE_LEN: usize = 8;
/// Longest wait for an edge before servicing the queue and stats.
const MAIN_LOOP_MS: u32 = 20;
const STATS_PERIOD_MS: u32 = 60_000;

type BoardButton =
    Button<GpioLine, EspDeadlineTimer, SystemClock, PressSender<'static, PRESS_QUEUE_LEN>>;

static BUTTON: SharedButton<BoardButton> = SharedButton::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("PressButton v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Event queue (button → main loop) ───────────────────
    let queue: &'static mut PressQueue<PRESS_QUEUE_LEN> = Box::leak(Box::new(PressQueue::new()));
    let (sender, mut receiver) = queue.split();

    // ── 3. Button (validates the config before any GPIO access) ─
    let config = ButtonConfig::new(pins::BUTTON_LINE, pins::BUTTON_POLARITY);
    let timer_service = EspTaskTimerService::new()?;
    let timer = EspDeadlineTimer::new(&timer_service, || BUTTON.on_debounce_elapsed())?;
    let mut button = Button::init(config, GpioLine::new(config.line), timer, SystemClock::new(), sender)?;

    // ── 4. Peripherals ────────────────────────────────────────
    hw_init::init_button_gpio(&config)?;
    hw_init::init_isr_service()?;

    // ── 5. Edge delivery (ISR → this task) ────────────────────
    // An edge between registration and install stays pending in the
    // notification and is handled on the first wait below.
    let edge_notification = Notification::new();
    let mut edges = GpioEdgeSource::new(edge_notification.notifier());
    button.start(&mut edges)?;
    BUTTON.install(button);

    // ── 6. Main loop ──────────────────────────────────────────
    let wait_ticks = TickType::new_millis(MAIN_LOOP_MS.into()).ticks();
    let mut log_sink = LogPressSink::new();
    let clock = SystemClock::new();
    let mut last_stats_ms = clock.now_ms();
    loop {
        if edge_notification.wait(wait_ticks).is_some() {
            BUTTON.on_edge();
        }

        while let Some(event) = receiver.recv() {
            log_sink.on_press(event);
        }

        if clock.now_ms().wrapping_sub(last_stats_ms) >= STATS_PERIOD_MS {
            last_stats_ms = clock.now_ms();
            if let Some((stats, dropped)) = BUTTON.with(|b| (b.stats(), b.handler().dropped())) {
                info!(
                    "STATS | presses={} bounces={} duplicates={} orphans={} read_errors={} arm_failures={} dropped={}",
                    stats.presses,
                    stats.bounces,
                    stats.duplicates,
                    stats.orphan_releases,
                    stats.read_errors,
                    stats.arm_failures,
                    dropped
                );
            }
        }
    }
}
