//! Integration tests for planetary day partitioning and current-hour lookup.
//!
//! Exercises the public API end to end with the almanac source, checking the
//! structural guarantees (contiguity, Chaldean succession, boundary ownership)
//! over real computed sunrises.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Weekday};
use hora_base::{
    BaseError, CHALDEAN_ORDER, GeoLocation, Planet, RiseSetConfig, compute_solar_events,
    day_ruler_for_date,
};
use hora_search::{
    CacheConfig, NoaaSource, SearchError, SolarEventCache, current_hour, current_hour_with_day,
    partition_hours, planetary_day,
};

fn nyc() -> GeoLocation {
    GeoLocation::new(40.7128, -74.006).unwrap()
}

fn edt() -> FixedOffset {
    FixedOffset::west_opt(4 * 3600).unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
}

fn local(date: NaiveDate, h: u32, m: u32, offset: FixedOffset) -> DateTime<FixedOffset> {
    date.and_hms_opt(h, m, 0)
        .unwrap()
        .and_local_timezone(offset)
        .unwrap()
}

#[test]
fn new_york_monday() {
    let src = NoaaSource::default();
    let date = monday();
    assert_eq!(date.weekday(), Weekday::Mon);
    assert_eq!(day_ruler_for_date(date), Planet::Moon);

    let events = compute_solar_events(&nyc(), date, edt(), &RiseSetConfig::default()).unwrap();
    let day = planetary_day(&src, &nyc(), date, edt()).unwrap();

    assert_eq!(day.day_ruler, Planet::Moon);
    assert_eq!(day.hours[0].ruler, Planet::Moon);
    assert!(day.hours[0].is_day);
    assert_eq!(day.hours[0].start, events.sunrise);
    assert!(!day.hours[12].is_day);
    assert_eq!(day.hours[12].start, events.sunset);
}

#[test]
fn hours_contiguous_and_anchored() {
    let src = NoaaSource::default();
    let cities = [
        (40.7128, -74.006, -240),
        (51.5074, -0.1278, 60),
        (-33.8688, 151.2093, 660),
        (28.6139, 77.209, 330),
        (64.1466, -21.9426, 0),
    ];
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for (lat, lon, off) in cities {
        let loc = GeoLocation::new(lat, lon).unwrap();
        let offset = FixedOffset::east_opt(off * 60).unwrap();
        for step in (0..366).step_by(17) {
            let date = start + Duration::days(step);
            let day = planetary_day(&src, &loc, date, offset).unwrap();
            let next = compute_solar_events(
                &loc,
                date.succ_opt().unwrap(),
                offset,
                &RiseSetConfig::default(),
            )
            .unwrap();

            assert_eq!(day.hours[0].start, day.sunrise, "{lat},{lon} {date}");
            assert_eq!(day.hours[11].end, day.sunset, "{lat},{lon} {date}");
            assert_eq!(day.hours[23].end, next.sunrise, "{lat},{lon} {date}");
            for pair in day.hours.windows(2) {
                assert!(pair[0].start < pair[0].end, "{lat},{lon} {date}");
                assert_eq!(pair[0].end, pair[1].start, "{lat},{lon} {date}");
            }
        }
    }
}

#[test]
fn sunrise_near_utc_midnight_keeps_hours_ordered() {
    // Kolkata in UTC: sunrise falls within minutes of 00:00 all year.
    let loc = GeoLocation::new(22.5726, 88.3639).unwrap();
    let utc = FixedOffset::east_opt(0).unwrap();
    let src = NoaaSource::default();
    let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    while date.year() == 2024 {
        let day = planetary_day(&src, &loc, date, utc).unwrap();
        assert!(day.sunrise < day.sunset, "{date}");
        assert!(day.sunset < day.next_sunrise, "{date}");
        assert!(day.next_sunrise - day.sunset <= Duration::days(1), "{date}");
        let span = day.next_sunrise - day.sunrise;
        assert!(span > Duration::hours(23) && span < Duration::hours(25), "{date}: {span}");
        assert_eq!(day.hours[0].start, day.sunrise, "{date}");
        assert_eq!(day.hours[23].end, day.next_sunrise, "{date}");
        for h in &day.hours {
            assert!(h.start < h.end, "{date} hour {}", h.index);
        }
        for pair in day.hours.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "{date}");
        }
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn day_and_night_hours_equal_within_half() {
    let day = planetary_day(&NoaaSource::default(), &nyc(), monday(), edt()).unwrap();
    let d0 = day.day_hours()[0].duration();
    let n0 = day.night_hours()[0].duration();
    for h in day.day_hours() {
        assert!((h.duration() - d0).num_milliseconds().abs() <= 1);
    }
    for h in day.night_hours() {
        assert!((h.duration() - n0).num_milliseconds().abs() <= 1);
    }
    // Mid-March in New York: days are just longer than nights.
    assert!(d0 > n0);
}

#[test]
fn rulers_follow_chaldean_order_every_weekday() {
    let src = NoaaSource::default();
    for offset_days in 0..7 {
        let date = monday() + Duration::days(offset_days);
        let day = planetary_day(&src, &nyc(), date, edt()).unwrap();
        let start = day.day_ruler.chaldean_index() as usize;
        for (i, h) in day.hours.iter().enumerate() {
            assert_eq!(h.ruler, CHALDEAN_ORDER[(start + i) % 7], "{date} hour {i}");
        }
    }
}

#[test]
fn day_ruler_depends_on_weekday_only() {
    let a = NaiveDate::from_ymd_opt(2019, 2, 4).unwrap();
    let b = NaiveDate::from_ymd_opt(2031, 11, 24).unwrap();
    assert_eq!(a.weekday(), Weekday::Mon);
    assert_eq!(b.weekday(), Weekday::Mon);
    assert_eq!(day_ruler_for_date(a), day_ruler_for_date(b));
}

#[test]
fn partition_from_explicit_boundaries() {
    let date = monday();
    let hours = partition_hours(
        local(date, 7, 0, edt()),
        local(date, 19, 0, edt()),
        local(date.succ_opt().unwrap(), 7, 0, edt()),
        Weekday::Mon,
    );
    assert_eq!(hours.len(), 24);
    assert_eq!(hours[6].start, local(date, 13, 0, edt()));
    assert_eq!(hours[18].start, local(date.succ_opt().unwrap(), 1, 0, edt()));
}

#[test]
fn locator_finds_exactly_one_hour() {
    let src = NoaaSource::default();
    let day = planetary_day(&src, &nyc(), monday(), edt()).unwrap();
    let mut t = day.sunrise;
    while t < day.next_sunrise {
        let matches = day.hours.iter().filter(|h| h.contains(t)).count();
        assert_eq!(matches, 1, "instant {t}");
        t += Duration::minutes(7);
    }
}

#[test]
fn boundary_belongs_to_later_hour() {
    let src = NoaaSource::default();
    let day = planetary_day(&src, &nyc(), monday(), edt()).unwrap();
    for i in 1..12 {
        let boundary = day.hours[i].start;
        let found = current_hour(&src, &nyc(), boundary).unwrap();
        assert_eq!(found.index as usize, i);
    }
    let at_sunset = current_hour(&src, &nyc(), day.sunset).unwrap();
    assert_eq!(at_sunset.index, 12);
    assert!(!at_sunset.is_day);
}

#[test]
fn sunrise_round_trip_every_weekday() {
    let src = NoaaSource::default();
    for offset_days in 0..7 {
        let date = monday() + Duration::days(offset_days);
        let day = planetary_day(&src, &nyc(), date, edt()).unwrap();
        let hour = current_hour(&src, &nyc(), day.sunrise).unwrap();
        assert!(hour.is_day, "{date}");
        assert_eq!(hour.ruler, day_ruler_for_date(date), "{date}");
    }
}

#[test]
fn small_hours_belong_to_previous_planetary_day() {
    let src = NoaaSource::default();
    let sunday = monday().pred_opt().unwrap();
    let sunday_day = planetary_day(&src, &nyc(), sunday, edt()).unwrap();

    for (h, m) in [(0, 0), (2, 30), (5, 45)] {
        let now = local(monday(), h, m, edt());
        let found = current_hour_with_day(&src, &nyc(), now).unwrap();
        assert_eq!(found.day.date, sunday, "{now}");
        assert!(!found.hour.is_day, "{now}");
        assert_eq!(found.hour, *sunday_day.find(now).unwrap());
    }
}

#[test]
fn arctic_winter_is_polar_night() {
    let loc = GeoLocation::new(78.0, 15.0).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
    let offset = FixedOffset::east_opt(3600).unwrap();
    let src = NoaaSource::default();

    assert_eq!(
        planetary_day(&src, &loc, date, offset),
        Err(SearchError::Base(BaseError::PolarDayNight { date }))
    );
    let now = local(date, 12, 0, offset);
    assert!(matches!(
        current_hour(&src, &loc, now),
        Err(SearchError::Base(BaseError::PolarDayNight { .. }))
    ));
}

#[test]
fn polar_error_message() {
    let date = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
    let err = SearchError::from(BaseError::PolarDayNight { date });
    assert!(err.to_string().contains("polar"), "{err}");
}

#[test]
fn cached_source_gives_identical_results() {
    let cache = SolarEventCache::new(NoaaSource::default(), CacheConfig::default()).unwrap();
    let plain = NoaaSource::default();
    let now = local(monday(), 4, 0, edt());

    let cached = current_hour_with_day(&cache, &nyc(), now).unwrap();
    let direct = current_hour_with_day(&plain, &nyc(), now).unwrap();
    assert_eq!(cached, direct);

    // Today (Mon, Tue) and yesterday (Sun, Mon): Monday's sunrise is reused.
    let stats = cache.stats();
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.hits, 1);

    current_hour(&cache, &nyc(), now).unwrap();
    assert_eq!(cache.stats().misses, 3);
}

#[test]
fn cache_shared_across_threads() {
    use std::sync::Arc;

    let cache = Arc::new(SolarEventCache::new(NoaaSource::default(), CacheConfig::default()).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                let now = local(monday(), 8 + i, 0, edt());
                current_hour(&*cache, &nyc(), now).map(|h| h.is_day)
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), Ok(true));
    }
}
