//! Base calculations for classical planetary hours.
//!
//! This crate provides:
//! - The seven classical planets, the Chaldean order, and hour rulers
//! - The weekday to day-ruler table
//! - Approximate sunrise/sunset (NOAA almanac method)
//! - Binaural tone parameters per planet
//! - Zodiac signs, focus areas, and the horoscope text seam
//!
//! Everything here is a pure function over value types.

pub mod day_ruler;
pub mod error;
pub mod horoscope;
pub mod planet;
pub mod riseset;
pub mod riseset_types;
pub mod tone;
pub mod util;

pub use day_ruler::{day_ruler, day_ruler_for_date, day_ruler_from_index};
pub use error::{BaseError, HoroscopeError};
pub use horoscope::{
    ALL_FOCUS_AREAS, ALL_ZODIAC_SIGNS, FocusArea, HoroscopeSource, ParseNameError, ZodiacSign,
    horoscope_prompt, non_empty_reply,
};
pub use planet::{
    ALL_PLANETS, CHALDEAN_ORDER, PLANET_COUNT, ParsePlanetError, Planet, hour_ruler,
};
pub use riseset::compute_solar_events;
pub use riseset_types::{
    DEFAULT_ZENITH_DEG, GeoLocation, MAX_OFFSET_MINUTES, RiseSetConfig, SolarEvents,
    utc_offset_from_minutes,
};
pub use tone::{BinauralTone, DEFAULT_BINAURAL_BEAT_HZ};
