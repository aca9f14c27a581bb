//! Where sunrise/sunset values come from.
//!
//! The partitioner and locator only need "sunrise and sunset for this place
//! and date"; [`SolarEventSource`] is that seam. [`NoaaSource`] computes
//! directly, [`crate::cache::SolarEventCache`] memoizes any source.

use chrono::{FixedOffset, NaiveDate};
use hora_base::{BaseError, GeoLocation, RiseSetConfig, SolarEvents, compute_solar_events};

/// Provider of sunrise/sunset for a (location, civil date, UTC offset).
///
/// Implementations must be deterministic: the same inputs always produce the
/// same output, including the same error.
pub trait SolarEventSource {
    fn solar_events(
        &self,
        location: &GeoLocation,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<SolarEvents, BaseError>;
}

impl<S: SolarEventSource + ?Sized> SolarEventSource for &S {
    fn solar_events(
        &self,
        location: &GeoLocation,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<SolarEvents, BaseError> {
        (**self).solar_events(location, date, offset)
    }
}

/// Stateless source running the almanac formula on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoaaSource {
    config: RiseSetConfig,
}

impl NoaaSource {
    pub fn new(config: RiseSetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiseSetConfig {
        &self.config
    }
}

impl SolarEventSource for NoaaSource {
    fn solar_events(
        &self,
        location: &GeoLocation,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<SolarEvents, BaseError> {
        compute_solar_events(location, date, offset, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noaa_matches_free_function() {
        let loc = GeoLocation::new(51.5074, -0.1278).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let offset = FixedOffset::east_opt(3600).unwrap();
        let src = NoaaSource::default();
        assert_eq!(
            src.solar_events(&loc, date, offset),
            compute_solar_events(&loc, date, offset, &RiseSetConfig::default())
        );
    }

    #[test]
    fn reference_forwards() {
        let loc = GeoLocation::new(51.5074, -0.1278).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let offset = FixedOffset::east_opt(0).unwrap();
        let src = NoaaSource::default();
        let by_ref: &dyn SolarEventSource = &src;
        assert_eq!(
            (&by_ref).solar_events(&loc, date, offset),
            src.solar_events(&loc, date, offset)
        );
    }
}
