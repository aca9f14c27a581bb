//! Approximate sunrise/sunset computation.
//!
//! Closed-form low-precision solar position after the NOAA / U.S. Naval
//! Observatory almanac method ("Almanac for Computers", 1990). Accuracy is a
//! few minutes for non-polar latitudes. No iteration, no ephemeris: the
//! result is a pure function of location, date, UTC offset, and zenith.
//!
//! Times are rounded to the whole minute (half-up), so identical inputs
//! always produce bit-identical instants.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime};

use crate::error::BaseError;
use crate::riseset_types::{GeoLocation, RiseSetConfig, SolarEvents};
use crate::util::{normalize_24, normalize_360};

/// Solar mean anomaly rate, degrees per day.
const MEAN_ANOMALY_RATE: f64 = 0.9856;
/// Solar mean anomaly at day 0, degrees.
const MEAN_ANOMALY_EPOCH: f64 = 3.289;
/// Longitude of perihelion plus 180 deg, degrees.
const PERIHELION_OFFSET: f64 = 282.634;
/// cos of the obliquity of the ecliptic.
const COS_OBLIQUITY: f64 = 0.91764;
/// sin of the obliquity of the ecliptic.
const SIN_OBLIQUITY: f64 = 0.39782;
/// Sidereal correction to local mean time, hours per day.
const SIDEREAL_CORRECTION: f64 = 0.06571;
/// Local mean time constant, hours.
const LMT_CONSTANT: f64 = 6.622;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Which horizon crossing to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    Rise,
    Set,
}

/// Approximate event time in days since the start of the year.
///
/// `t = N + (6 - lon_hours) / 24`, anchored on 06:00 local mean time.
fn approximate_time(day_of_year: u32, lon_hours: f64) -> f64 {
    day_of_year as f64 + (6.0 - lon_hours) / 24.0
}

/// Sun's true ecliptic longitude in degrees, [0, 360).
fn sun_true_longitude_deg(t: f64) -> f64 {
    let m = MEAN_ANOMALY_RATE * t - MEAN_ANOMALY_EPOCH;
    let m_rad = m.to_radians();
    normalize_360(m + 1.916 * m_rad.sin() + 0.020 * (2.0 * m_rad).sin() + PERIHELION_OFFSET)
}

/// Sun's right ascension in hours, placed in the same quadrant as `l_deg`.
fn right_ascension_hours(l_deg: f64) -> f64 {
    let ra = normalize_360((COS_OBLIQUITY * l_deg.to_radians().tan()).atan().to_degrees());
    let l_quadrant = (l_deg / 90.0).floor() * 90.0;
    let ra_quadrant = (ra / 90.0).floor() * 90.0;
    (ra + (l_quadrant - ra_quadrant)) / 15.0
}

/// Cosine of the Sun's local hour angle at the given zenith.
///
/// Values outside [-1, 1] mean the Sun never reaches the zenith that day:
/// `> 1` never rises, `< -1` never sets.
fn cos_local_hour_angle(l_deg: f64, latitude_rad: f64, zenith_deg: f64) -> f64 {
    let sin_dec = SIN_OBLIQUITY * l_deg.to_radians().sin();
    let cos_dec = sin_dec.asin().cos();
    (zenith_deg.to_radians().cos() - sin_dec * latitude_rad.sin()) / (cos_dec * latitude_rad.cos())
}

/// UT hour of sunrise and sunset, each normalized to [0, 24).
///
/// Returns `None` when the Sun does not cross the zenith (polar day/night).
fn rise_set_ut_hours(
    location: &GeoLocation,
    day_of_year: u32,
    config: &RiseSetConfig,
) -> Option<(f64, f64)> {
    let lon_hours = location.longitude_hours();
    let t = approximate_time(day_of_year, lon_hours);
    let l = sun_true_longitude_deg(t);
    let ra = right_ascension_hours(l);

    let cos_h = cos_local_hour_angle(l, location.latitude_rad(), config.zenith_deg);
    if !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }
    let h = cos_h.acos().to_degrees() / 15.0;

    let ut = |crossing: Crossing| {
        let signed_h = match crossing {
            Crossing::Rise => -h,
            Crossing::Set => h,
        };
        let local_mean = signed_h + ra - SIDEREAL_CORRECTION * t - LMT_CONSTANT;
        normalize_24(local_mean - lon_hours)
    };
    Some((ut(Crossing::Rise), ut(Crossing::Set)))
}

/// Wall-clock instant on `date` at `ut_hours` shifted into `offset`.
///
/// The local hour wraps into [0, 24) on the same civil date, then rounds to
/// the nearest minute. A minute that rounds up to 24:00 wraps to 00:00 of
/// `date` as well.
fn local_instant(
    date: NaiveDate,
    offset: FixedOffset,
    ut_hours: f64,
) -> Result<DateTime<FixedOffset>, BaseError> {
    let offset_hours = offset.local_minus_utc() as f64 / 3600.0;
    let local_hours = normalize_24(ut_hours + offset_hours);
    let minutes = (local_hours.floor() as i64 * 60 + (local_hours.fract() * 60.0).round() as i64)
        .rem_euclid(MINUTES_PER_DAY);

    let naive_local = date
        .and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::minutes(minutes))
        .ok_or(BaseError::DateOutOfRange("local event time"))?;
    let naive_utc = naive_local
        .checked_sub_signed(Duration::seconds(offset.local_minus_utc() as i64))
        .ok_or(BaseError::DateOutOfRange("UTC event time"))?;
    Ok(DateTime::from_naive_utc_and_offset(naive_utc, offset))
}

/// Compute sunrise and sunset for a civil date at a location.
///
/// # Arguments
/// * `location` — observer location (validated on construction)
/// * `date` — civil date; only its day-of-year enters the solar formulas
/// * `offset` — local UTC offset; the returned instants are on `date` in this offset
/// * `config` — zenith threshold
///
/// # Errors
/// * `BaseError::PolarDayNight` if the Sun does not cross the zenith on `date`
///
/// If the wall-clock sunset lands at or before the wall-clock sunrise
/// (the offset is far from the longitude's solar time and one event wrapped
/// across local midnight), sunset is moved to the following day.
pub fn compute_solar_events(
    location: &GeoLocation,
    date: NaiveDate,
    offset: FixedOffset,
    config: &RiseSetConfig,
) -> Result<SolarEvents, BaseError> {
    let (rise_ut, set_ut) = rise_set_ut_hours(location, date.ordinal(), config)
        .ok_or(BaseError::PolarDayNight { date })?;

    let sunrise = local_instant(date, offset, rise_ut)?;
    let mut sunset = local_instant(date, offset, set_ut)?;
    if sunset <= sunrise {
        sunset = sunset
            .checked_add_signed(Duration::days(1))
            .ok_or(BaseError::DateOutOfRange("sunset after local midnight"))?;
    }
    Ok(SolarEvents { sunrise, sunset })
}
