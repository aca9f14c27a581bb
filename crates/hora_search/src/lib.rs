//! Planetary hour search: partitioning a day into 24 ruled hours and
//! locating the hour that contains a given instant.
//!
//! This crate provides:
//! - `SolarEventSource`, the seam for sunrise/sunset, with a direct
//!   implementation and a memoizing cache
//! - Day partitioning into 12 day and 12 night hours with Chaldean rulers
//! - Current-hour lookup across the midnight-to-sunrise boundary

pub mod cache;
pub mod error;
pub mod hora;
pub mod hora_types;
pub mod locate;
pub mod source;

pub use cache::{CacheConfig, CacheStats, SolarEventCache};
pub use error::SearchError;
pub use hora::{partition_hours, planetary_day};
pub use hora_types::{CurrentHour, HOURS_PER_DAY, HOURS_PER_HALF, PlanetaryDay, PlanetaryHour};
pub use locate::{current_hour, current_hour_with_day};
pub use source::{NoaaSource, SolarEventSource};
