//! Error types for planetary-hour base calculations.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from base calculations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BaseError {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or non-finite.
    #[error("invalid coordinate: latitude {latitude_deg}, longitude {longitude_deg}")]
    InvalidCoordinate {
        latitude_deg: f64,
        longitude_deg: f64,
    },
    /// The Sun never crosses the rise/set zenith on this date (polar day or night).
    #[error("no sunrise or sunset on {date}: polar day or night at this latitude")]
    PolarDayNight { date: NaiveDate },
    /// UTC offset outside the representable range, in minutes.
    #[error("invalid UTC offset: {0} minutes")]
    InvalidOffset(i32),
    /// A date step left chrono's supported calendar range.
    #[error("date out of range: {0}")]
    DateOutOfRange(&'static str),
    /// Tone volume outside [0, 1].
    #[error("invalid volume: {0} (expected 0.0..=1.0)")]
    InvalidVolume(f64),
}

/// Errors from a horoscope text source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HoroscopeError {
    /// The text service failed or returned nothing usable.
    #[error("the celestial signals are unclear; try again later")]
    Unavailable,
}
