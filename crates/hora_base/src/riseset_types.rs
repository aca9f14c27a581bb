//! Types for sunrise/sunset calculations.
//!
//! Provides geographic location, configuration, and result types used by the
//! rise/set computation module.

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;

use crate::error::BaseError;

/// Zenith angle of the Sun's center at sunrise/sunset in degrees.
///
/// 90 deg plus 50 arcmin: 34' horizontal refraction + 16' solar semidiameter.
pub const DEFAULT_ZENITH_DEG: f64 = 90.8333;

/// Largest UTC offset accepted, in minutes (one minute short of a day).
pub const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// Geographic location on Earth's surface.
///
/// Construct with [`GeoLocation::new`], which rejects out-of-range or
/// non-finite coordinates before any trigonometry sees them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    longitude_deg: f64,
}

impl GeoLocation {
    /// Create a validated geographic location.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, BaseError> {
        let lat_ok = latitude_deg.is_finite() && (-90.0..=90.0).contains(&latitude_deg);
        let lon_ok = longitude_deg.is_finite() && (-180.0..=180.0).contains(&longitude_deg);
        if !lat_ok || !lon_ok {
            return Err(BaseError::InvalidCoordinate {
                latitude_deg,
                longitude_deg,
            });
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude expressed as an hour offset from Greenwich (`lon / 15`).
    pub fn longitude_hours(&self) -> f64 {
        self.longitude_deg / 15.0
    }

    /// Coordinates scaled to `decimals` decimal places and rounded to integers.
    ///
    /// Two locations with equal keys are treated as the same place by caches.
    pub fn rounded_key(&self, decimals: u32) -> (i64, i64) {
        let scale = 10f64.powi(decimals as i32);
        (
            (self.latitude_deg * scale).round() as i64,
            (self.longitude_deg * scale).round() as i64,
        )
    }
}

/// Build a [`FixedOffset`] from minutes east of UTC.
pub fn utc_offset_from_minutes(minutes: i32) -> Result<FixedOffset, BaseError> {
    if minutes.unsigned_abs() > MAX_OFFSET_MINUTES.unsigned_abs() {
        return Err(BaseError::InvalidOffset(minutes));
    }
    FixedOffset::east_opt(minutes * 60).ok_or(BaseError::InvalidOffset(minutes))
}

/// Configurable parameters for rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetConfig {
    /// Solar zenith angle defining sunrise/sunset, in degrees. Default: 90.8333.
    pub zenith_deg: f64,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            zenith_deg: DEFAULT_ZENITH_DEG,
        }
    }
}

/// Sunrise and sunset for one civil date at one location.
///
/// Both instants carry the UTC offset the calculation was run with.
/// `sunrise < sunset` always holds for a successfully computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarEvents {
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
}

impl SolarEvents {
    /// Length of daylight.
    pub fn day_length(&self) -> Duration {
        self.sunset - self.sunrise
    }
}
