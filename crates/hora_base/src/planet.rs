//! The seven classical planets and the Chaldean order.
//!
//! Planets form a closed set: they are looked up, never constructed at
//! runtime. Each carries its display symbol, a display color tag for the
//! presentation layer, and a base tone frequency used by the binaural player.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

/// Number of planets in the Chaldean cycle.
pub const PLANET_COUNT: u8 = 7;

/// The 7 classical planets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
}

/// All 7 planets in weekday order (Sunday's ruler first).
pub const ALL_PLANETS: [Planet; 7] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
];

/// Chaldean order: slowest apparent motion to fastest.
/// Successive planetary hours step through this cycle.
pub const CHALDEAN_ORDER: [Planet; 7] = [
    Planet::Saturn,
    Planet::Jupiter,
    Planet::Mars,
    Planet::Sun,
    Planet::Venus,
    Planet::Mercury,
    Planet::Moon,
];

impl Planet {
    /// English name of the planet.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Mercury => "Mercury",
            Self::Jupiter => "Jupiter",
            Self::Venus => "Venus",
            Self::Saturn => "Saturn",
        }
    }

    /// Astronomical display symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Sun => "☉",
            Self::Moon => "☽",
            Self::Mars => "♂",
            Self::Mercury => "☿",
            Self::Jupiter => "♃",
            Self::Venus => "♀",
            Self::Saturn => "♄",
        }
    }

    /// Display color tag consumed by the presentation layer.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Sun => "text-yellow-400",
            Self::Moon => "text-gray-300",
            Self::Mars => "text-red-500",
            Self::Mercury => "text-indigo-400",
            Self::Jupiter => "text-orange-500",
            Self::Venus => "text-pink-400",
            Self::Saturn => "text-blue-400",
        }
    }

    /// Base tone frequency in Hz.
    pub const fn frequency_hz(self) -> f64 {
        match self {
            Self::Sun => 126.22,
            Self::Moon => 210.42,
            Self::Mars => 144.72,
            Self::Mercury => 141.27,
            Self::Jupiter => 183.58,
            Self::Venus => 221.23,
            Self::Saturn => 147.85,
        }
    }

    /// 0-based index into ALL_PLANETS (also the weekday it rules, 0=Sunday).
    pub const fn index(self) -> u8 {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mars => 2,
            Self::Mercury => 3,
            Self::Jupiter => 4,
            Self::Venus => 5,
            Self::Saturn => 6,
        }
    }

    /// 0-based position in CHALDEAN_ORDER.
    pub const fn chaldean_index(self) -> u8 {
        match self {
            Self::Saturn => 0,
            Self::Jupiter => 1,
            Self::Mars => 2,
            Self::Sun => 3,
            Self::Venus => 4,
            Self::Mercury => 5,
            Self::Moon => 6,
        }
    }

    /// Planet `steps` places further along the Chaldean cycle.
    pub const fn chaldean_step(self, steps: u32) -> Planet {
        let idx = (self.chaldean_index() as u32 + steps) % PLANET_COUNT as u32;
        CHALDEAN_ORDER[idx as usize]
    }
}

impl Display for Planet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a planet name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown planet: {0} (expected Sun, Moon, Mars, Mercury, Jupiter, Venus, Saturn)")]
pub struct ParsePlanetError(pub String);

impl FromStr for Planet {
    type Err = ParsePlanetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_PLANETS
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePlanetError(s.to_string()))
    }
}

/// Ruler of the planetary hour at `hour_index` (0..24) of a day ruled by `day_ruler`.
///
/// Hour 0 is the first hour after sunrise and is always ruled by the day ruler.
/// Indices beyond 23 keep cycling.
pub const fn hour_ruler(day_ruler: Planet, hour_index: u8) -> Planet {
    day_ruler.chaldean_step(hour_index as u32)
}
