//! Types for planetary hour results.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use hora_base::Planet;
use serde::Serialize;

/// Planetary hours in one day (12 day + 12 night).
pub const HOURS_PER_DAY: usize = 24;

/// Planetary hours in each of the day and night halves.
pub const HOURS_PER_HALF: usize = 12;

/// One planetary hour: a ruler over a half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanetaryHour {
    /// The ruling planet.
    pub ruler: Planet,
    /// Start of this hour (inclusive).
    pub start: DateTime<FixedOffset>,
    /// End of this hour (exclusive).
    pub end: DateTime<FixedOffset>,
    /// True for the 12 hours between sunrise and sunset.
    pub is_day: bool,
    /// 0-based position within the planetary day (0..23; 12 is the first night hour).
    pub index: u8,
}

impl PlanetaryHour {
    /// Whether `instant` falls in `[start, end)`.
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// 1-based position within its half (1..=12).
    pub fn ordinal_in_half(&self) -> u8 {
        self.index % HOURS_PER_HALF as u8 + 1
    }
}

/// The 24 planetary hours from one sunrise to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanetaryDay {
    /// Civil date of the opening sunrise.
    pub date: NaiveDate,
    /// Ruler of the date's weekday; also the ruler of hour 0.
    pub day_ruler: Planet,
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
    /// Sunrise of the following civil date; end of the last night hour.
    pub next_sunrise: DateTime<FixedOffset>,
    /// Day hours then night hours, chronological and contiguous.
    pub hours: [PlanetaryHour; HOURS_PER_DAY],
}

impl PlanetaryDay {
    /// The 12 hours from sunrise to sunset.
    pub fn day_hours(&self) -> &[PlanetaryHour] {
        &self.hours[..HOURS_PER_HALF]
    }

    /// The 12 hours from sunset to the next sunrise.
    pub fn night_hours(&self) -> &[PlanetaryHour] {
        &self.hours[HOURS_PER_HALF..]
    }

    /// The hour containing `instant`, if any.
    pub fn find(&self, instant: DateTime<FixedOffset>) -> Option<&PlanetaryHour> {
        self.hours.iter().find(|h| h.contains(instant))
    }

    /// Whether `instant` lies in `[sunrise, next_sunrise)`.
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        self.sunrise <= instant && instant < self.next_sunrise
    }
}

/// Result of a current-hour lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentHour {
    /// The hour containing the queried instant.
    pub hour: PlanetaryHour,
    /// The planetary day the hour belongs to. Its date is the day before the
    /// instant's civil date when the instant precedes that date's sunrise.
    pub day: PlanetaryDay,
}
