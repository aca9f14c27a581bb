//! Binaural tone parameters for a planet.
//!
//! Only the numbers handed to an external audio player: the left ear plays
//! `base - beat/2`, the right ear `base + beat/2`, so the perceived beat equals
//! `beat`. Audio output itself is not part of this crate.

use serde::Serialize;

use crate::error::BaseError;
use crate::planet::Planet;

/// Default binaural beat in Hz (theta band).
pub const DEFAULT_BINAURAL_BEAT_HZ: f64 = 4.0;

/// Left/right carrier frequencies and gain for one planet's tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinauralTone {
    pub planet: Planet,
    pub left_hz: f64,
    pub right_hz: f64,
    /// Linear gain in [0, 1].
    pub volume: f64,
}

impl BinauralTone {
    /// Tone for `planet` with the given beat frequency and volume.
    pub fn new(planet: Planet, beat_hz: f64, volume: f64) -> Result<Self, BaseError> {
        if !(0.0..=1.0).contains(&volume) {
            return Err(BaseError::InvalidVolume(volume));
        }
        let base = planet.frequency_hz();
        Ok(Self {
            planet,
            left_hz: base - beat_hz / 2.0,
            right_hz: base + beat_hz / 2.0,
            volume,
        })
    }

    /// Perceived beat frequency.
    pub fn beat_hz(&self) -> f64 {
        self.right_hz - self.left_hz
    }
}
