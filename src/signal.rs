//! Edge directions, polarity mapping, and the post-edge input sampler.

use embedded_hal::digital::InputPin;

use crate::config::Polarity;

/// Direction of the last transition seen on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Low → high.
    Rising,
    /// High → low.
    Falling,
    /// Nothing observed yet (before `start`, after `stop`).
    Unknown,
}

impl Edge {
    /// Direction implied by a settled logic level.
    pub const fn from_level(high: bool) -> Self {
        if high { Self::Rising } else { Self::Falling }
    }
}

/// What an edge means for a given polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMeaning {
    Press,
    Release,
}

/// The one place the polarity/direction pairing lives.
///
/// | Polarity     | Falling   | Rising    |
/// |--------------|-----------|-----------|
/// | `ActiveLow`  | `Press`   | `Release` |
/// | `ActiveHigh` | `Release` | `Press`   |
pub const fn direction_meaning(polarity: Polarity, edge: Edge) -> Option<EdgeMeaning> {
    match (polarity, edge) {
        (Polarity::ActiveLow, Edge::Falling) | (Polarity::ActiveHigh, Edge::Rising) => {
            Some(EdgeMeaning::Press)
        }
        (Polarity::ActiveLow, Edge::Rising) | (Polarity::ActiveHigh, Edge::Falling) => {
            Some(EdgeMeaning::Release)
        }
        (_, Edge::Unknown) => None,
    }
}

/// Confirm a just-reported level by re-sampling the line `samples` times.
///
/// Every sample agrees → the reported level stands.  The first sample that
/// disagrees ends the check and the *complement* of the reported level is
/// returned, not the majority.  A line still ringing is read as having
/// already moved on.
pub fn confirm_level<P: InputPin>(pin: &mut P, reported: bool, samples: u8) -> Result<bool, P::Error> {
    for _ in 0..samples {
        if pin.is_high()? != reported {
            return Ok(!reported);
        }
    }
    Ok(reported)
}

/// Read the line once and confirm the reading with [`confirm_level`].
pub fn sample_level<P: InputPin>(pin: &mut P, samples: u8) -> Result<bool, P::Error> {
    let reported = pin.is_high()?;
    confirm_level(pin, reported, samples)
}
