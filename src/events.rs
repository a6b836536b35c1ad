//! Edge handler → main-loop press event queue.
//!
//! The button's press handler runs inside the edge path, under the
//! `SharedButton` critical section, where logging or heavy work would
//! stall the timer task.  [`PressSender`] is a [`PressHandler`] that only
//! enqueues; the main loop drains the [`PressReceiver`] at its own pace.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ on_edge     │────▶│  PressQueue  │────▶│  Main Loop   │
//! │ (producer)  │     │  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use heapless::spsc::{Consumer, Producer, Queue};

use crate::ports::PressHandler;
use crate::press::PressEvent;

/// Fixed-capacity SPSC queue.  Holds at most `N - 1` events.
pub struct PressQueue<const N: usize> {
    queue: Queue<PressEvent, N>,
}

impl<const N: usize> Default for PressQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PressQueue<N> {
    pub const fn new() -> Self {
        Self { queue: Queue::new() }
    }

    /// Split into the edge-side sender and the main-loop receiver.
    pub fn split(&mut self) -> (PressSender<'_, N>, PressReceiver<'_, N>) {
        let (producer, consumer) = self.queue.split();
        (
            PressSender {
                producer,
                dropped: 0,
            },
            PressReceiver { consumer },
        )
    }
}

/// Producer half.  Install as the button's press handler.
pub struct PressSender<'a, const N: usize> {
    producer: Producer<'a, PressEvent, N>,
    dropped: u32,
}

impl<const N: usize> PressSender<'_, N> {
    /// Events discarded because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> PressHandler for PressSender<'_, N> {
    fn on_press(&mut self, event: PressEvent) {
        // Full queue: keep the older events, drop the newest.
        if self.producer.enqueue(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

/// Consumer half, owned by the main loop.
pub struct PressReceiver<'a, const N: usize> {
    consumer: Consumer<'a, PressEvent, N>,
}

impl<const N: usize> PressReceiver<'_, N> {
    pub fn recv(&mut self) -> Option<PressEvent> {
        self.consumer.dequeue()
    }

    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
