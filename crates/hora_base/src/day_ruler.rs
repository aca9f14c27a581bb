//! Weekday to ruling planet.
//!
//! Fixed table: Sunday=Sun, Monday=Moon, Tuesday=Mars, Wednesday=Mercury,
//! Thursday=Jupiter, Friday=Venus, Saturday=Saturn. Depends on the weekday only.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::planet::{ALL_PLANETS, Planet};

/// Ruling planet of a weekday.
pub fn day_ruler(weekday: Weekday) -> Planet {
    ALL_PLANETS[weekday.num_days_from_sunday() as usize]
}

/// Ruling planet of a civil date's weekday.
pub fn day_ruler_for_date(date: NaiveDate) -> Planet {
    day_ruler(date.weekday())
}

/// Ruling planet from a weekday index (0=Sunday .. 6=Saturday).
pub fn day_ruler_from_index(index: u8) -> Option<Planet> {
    ALL_PLANETS.get(index as usize).copied()
}
