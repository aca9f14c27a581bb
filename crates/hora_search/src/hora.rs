//! Planetary hour partitioning.
//!
//! Sunrise to sunset is split into 12 equal day hours and sunset to the next
//! sunrise into 12 equal night hours. Rulers step through the Chaldean order
//! starting from the weekday's ruler, so hour 0 always belongs to the day
//! ruler and the 25th step lands on the next weekday's ruler.
//!
//! Boundaries are computed as `base + span * k / 12` in whole milliseconds,
//! so every hour ends exactly where the next begins and the twelfth boundary
//! is exactly the closing event.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Weekday};
use hora_base::{BaseError, GeoLocation, day_ruler, hour_ruler};
use tracing::debug;

use crate::error::SearchError;
use crate::hora_types::{HOURS_PER_DAY, HOURS_PER_HALF, PlanetaryDay, PlanetaryHour};
use crate::source::SolarEventSource;

/// `k`-th of 12 equal boundaries between `base` and `base + span_ms`.
fn boundary(base: DateTime<FixedOffset>, span_ms: i64, k: usize) -> DateTime<FixedOffset> {
    base + Duration::milliseconds(span_ms * k as i64 / HOURS_PER_HALF as i64)
}

/// Divide a day into 24 planetary hours.
///
/// # Arguments
/// * `sunrise` — opening sunrise
/// * `sunset` — sunset of the same day
/// * `next_sunrise` — sunrise of the following day
/// * `weekday` — weekday whose ruler governs hour 0
///
/// Expects `sunrise < sunset < next_sunrise`. Output is chronological:
/// indices 0..12 are day hours, 12..24 night hours.
pub fn partition_hours(
    sunrise: DateTime<FixedOffset>,
    sunset: DateTime<FixedOffset>,
    next_sunrise: DateTime<FixedOffset>,
    weekday: Weekday,
) -> [PlanetaryHour; HOURS_PER_DAY] {
    let ruler = day_ruler(weekday);
    let day_span = (sunset - sunrise).num_milliseconds();
    let night_span = (next_sunrise - sunset).num_milliseconds();

    std::array::from_fn(|i| {
        let is_day = i < HOURS_PER_HALF;
        let (base, span, k) = if is_day {
            (sunrise, day_span, i)
        } else {
            (sunset, night_span, i - HOURS_PER_HALF)
        };
        PlanetaryHour {
            ruler: hour_ruler(ruler, i as u8),
            start: boundary(base, span, k),
            end: boundary(base, span, k + 1),
            is_day,
            index: i as u8,
        }
    })
}

/// Compute the planetary day that opens at `date`'s sunrise.
///
/// Solves sunrise/sunset for `date` and sunrise for the day after; with a
/// caching source the second solve is shared with the next day's query.
///
/// Wall-clock events are wrapped onto their civil date, so when sunrise sits
/// near local midnight the two solves can land on the same side of it. The
/// closing sunrise is moved by whole days into `(sunset, sunset + 1 day]`,
/// keeping every hour non-empty.
///
/// # Errors
/// * `SearchError::Base(BaseError::PolarDayNight)` if either solve fails
pub fn planetary_day<S: SolarEventSource + ?Sized>(
    source: &S,
    location: &GeoLocation,
    date: NaiveDate,
    offset: FixedOffset,
) -> Result<PlanetaryDay, SearchError> {
    let today = source.solar_events(location, date, offset)?;
    let next_date = date
        .succ_opt()
        .ok_or(BaseError::DateOutOfRange("day after planetary day"))?;
    let tomorrow = source.solar_events(location, next_date, offset)?;
    let next_sunrise = closing_sunrise(today.sunset, tomorrow.sunrise)?;

    let hours = partition_hours(today.sunrise, today.sunset, next_sunrise, date.weekday());
    Ok(PlanetaryDay {
        date,
        day_ruler: day_ruler(date.weekday()),
        sunrise: today.sunrise,
        sunset: today.sunset,
        next_sunrise,
        hours,
    })
}

/// Shift `next_sunrise` by whole days until it lies in `(sunset, sunset + 1 day]`.
fn closing_sunrise(
    sunset: DateTime<FixedOffset>,
    next_sunrise: DateTime<FixedOffset>,
) -> Result<DateTime<FixedOffset>, BaseError> {
    let day = Duration::days(1);
    let gap = next_sunrise - sunset;
    // Whole days to add so that 0 < gap + k days <= 1 day.
    let gap_ms = gap.num_milliseconds();
    let day_ms = day.num_milliseconds();
    let k = (day_ms - gap_ms).div_euclid(day_ms);
    if k != 0 {
        debug!(%sunset, %next_sunrise, shift_days = k, "closing sunrise moved across midnight");
    }
    next_sunrise
        .checked_add_signed(Duration::days(k))
        .ok_or(BaseError::DateOutOfRange("closing sunrise"))
}
