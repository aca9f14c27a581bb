//! Current planetary hour lookup.
//!
//! An instant belongs to the planetary day of its own civil date when it is at
//! or after that date's sunrise; before sunrise it belongs to the previous
//! day's night. Both days are computed in the instant's own UTC offset.

use chrono::{DateTime, FixedOffset};
use hora_base::{BaseError, GeoLocation};
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::hora::planetary_day;
use crate::hora_types::{CurrentHour, PlanetaryHour};
use crate::source::SolarEventSource;

/// Find the planetary hour containing `now` at `location`.
///
/// See [`current_hour_with_day`] for the lookup order.
pub fn current_hour<S: SolarEventSource + ?Sized>(
    source: &S,
    location: &GeoLocation,
    now: DateTime<FixedOffset>,
) -> Result<PlanetaryHour, SearchError> {
    current_hour_with_day(source, location, now).map(|found| found.hour)
}

/// Find the planetary hour containing `now`, together with its planetary day.
///
/// 1. Partition `now`'s civil date and return the hour with `start <= now < end`.
/// 2. Otherwise partition the previous date and scan its night hours, then its
///    day hours (these only reach past local midnight when sunset was carried
///    into the next day by a UTC offset far from local solar time).
///
/// # Errors
/// * `SearchError::Base` — polar day/night on either date, propagated unchanged
/// * `SearchError::HourNotFound` — no computed hour contains `now`
pub fn current_hour_with_day<S: SolarEventSource + ?Sized>(
    source: &S,
    location: &GeoLocation,
    now: DateTime<FixedOffset>,
) -> Result<CurrentHour, SearchError> {
    let offset = *now.offset();
    let date = now.date_naive();

    let today = planetary_day(source, location, date, offset)?;
    if let Some(hour) = today.find(now).copied() {
        return Ok(CurrentHour { hour, day: today });
    }

    debug!(%now, sunrise = %today.sunrise, "instant precedes sunrise; checking previous night");
    let prev = date
        .pred_opt()
        .ok_or(BaseError::DateOutOfRange("day before instant"))?;
    let yesterday = planetary_day(source, location, prev, offset)?;
    let hit = yesterday
        .night_hours()
        .iter()
        .chain(yesterday.day_hours())
        .find(|h| h.contains(now))
        .copied();

    match hit {
        Some(hour) => Ok(CurrentHour {
            hour,
            day: yesterday,
        }),
        None => {
            warn!(
                %now,
                today_sunrise = %today.sunrise,
                yesterday_night_end = %yesterday.next_sunrise,
                "no planetary hour contains instant"
            );
            Err(SearchError::HourNotFound { instant: now })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use chrono::{NaiveDate, Timelike};
    use hora_base::{Planet, SolarEvents};

    use crate::source::NoaaSource;

    fn edt() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> DateTime<FixedOffset> {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_local_timezone(edt())
            .unwrap()
    }

    fn nyc() -> GeoLocation {
        GeoLocation::new(40.7128, -74.006).unwrap()
    }

    #[test]
    fn midday_is_a_day_hour_of_today() {
        let found = current_hour_with_day(&NoaaSource::default(), &nyc(), at(18, 12, 0)).unwrap();
        assert!(found.hour.is_day);
        assert_eq!(found.day.date, at(18, 0, 0).date_naive());
        assert!(found.hour.contains(at(18, 12, 0)));
    }

    #[test]
    fn late_evening_is_a_night_hour_of_today() {
        let found = current_hour_with_day(&NoaaSource::default(), &nyc(), at(18, 23, 0)).unwrap();
        assert!(!found.hour.is_day);
        assert_eq!(found.day.day_ruler, Planet::Moon);
    }

    #[test]
    fn before_sunrise_falls_back_to_yesterday() {
        // 03:00 Monday belongs to Sunday's night.
        let found = current_hour_with_day(&NoaaSource::default(), &nyc(), at(18, 3, 0)).unwrap();
        assert!(!found.hour.is_day);
        assert_eq!(found.day.date, at(17, 0, 0).date_naive());
        assert_eq!(found.day.day_ruler, Planet::Sun);
    }

    #[test]
    fn at_sunrise_is_first_day_hour() {
        let src = NoaaSource::default();
        let day = planetary_day(&src, &nyc(), at(18, 0, 0).date_naive(), edt()).unwrap();
        let hour = current_hour(&src, &nyc(), day.sunrise).unwrap();
        assert_eq!(hour.index, 0);
        assert!(hour.is_day);
        assert_eq!(hour.ruler, Planet::Moon);
    }

    #[test]
    fn just_before_sunrise_is_last_night_hour() {
        let src = NoaaSource::default();
        let day = planetary_day(&src, &nyc(), at(18, 0, 0).date_naive(), edt()).unwrap();
        let instant = day.sunrise - chrono::Duration::seconds(1);
        let hour = current_hour(&src, &nyc(), instant).unwrap();
        assert_eq!(hour.index, 23);
        assert_eq!(hour.end, day.sunrise);
    }

    #[test]
    fn utc_offset_far_from_solar_time() {
        // New York computed in UTC during summer: sunset lands after 00:00 UTC,
        // so just after midnight is still a day hour of the previous date.
        let utc = FixedOffset::east_opt(0).unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 6, 21)
            .unwrap()
            .and_hms_opt(0, 10, 0)
            .unwrap()
            .and_local_timezone(utc)
            .unwrap();
        let found = current_hour_with_day(&NoaaSource::default(), &nyc(), now).unwrap();
        assert!(found.hour.contains(now));
        assert!(found.hour.is_day);
        assert_eq!(found.day.date, NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
    }

    #[test]
    fn polar_night_propagates() {
        let loc = GeoLocation::new(78.0, 15.0).unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 12, 21)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_local_timezone(FixedOffset::east_opt(3600).unwrap())
            .unwrap();
        let err = current_hour(&NoaaSource::default(), &loc, now).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Base(BaseError::PolarDayNight { .. })
        ));
    }

    /// Source whose answers drift between calls, leaving a gap before sunrise.
    struct DriftingSource {
        calls: Cell<u32>,
    }

    impl SolarEventSource for DriftingSource {
        fn solar_events(
            &self,
            _location: &GeoLocation,
            date: NaiveDate,
            offset: FixedOffset,
        ) -> Result<SolarEvents, BaseError> {
            let n = self.calls.get();
            self.calls.set(n + 1);
            // The fourth call (today's sunrise, re-solved as yesterday's
            // closing sunrise) comes back an hour early.
            let rise_hour = if n == 3 { 5 } else { 6 };
            let mk = |h: u32| {
                date.and_hms_opt(h, 0, 0)
                    .unwrap()
                    .and_local_timezone(offset)
                    .unwrap()
            };
            Ok(SolarEvents {
                sunrise: mk(rise_hour),
                sunset: mk(18),
            })
        }
    }

    #[test]
    fn gap_surfaces_hour_not_found() {
        let src = DriftingSource {
            calls: Cell::new(0),
        };
        let now = at(18, 5, 30);
        let err = current_hour(&src, &nyc(), now).unwrap_err();
        assert_eq!(err, SearchError::HourNotFound { instant: now });
        assert_eq!(src.calls.get(), 4);
    }

    #[test]
    fn result_keeps_callers_offset() {
        let hour = current_hour(&NoaaSource::default(), &nyc(), at(18, 12, 0)).unwrap();
        assert_eq!(hour.start.offset().local_minus_utc(), -4 * 3600);
        assert!(hour.start.hour() <= 12);
    }
}
