//! Memoized sunrise/sunset lookups.
//!
//! A full planetary day needs two solves, and the before-sunrise path of the
//! locator needs two more, one of which repeats today's. Callers that query
//! repeatedly (a UI polling once a minute) wrap their source in a
//! [`SolarEventCache`] so each (place, date, offset) is solved once.
//!
//! Keys round latitude and longitude to `coordinate_decimals` places, so GPS
//! jitter below that precision reuses the same entry. Polar failures are
//! cached as well; they are deterministic.
//!
//! The cache is [`Send`] + [`Sync`] when its source is, and can be shared via
//! `Arc`. The lock is not held while a miss is computed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::{FixedOffset, NaiveDate};
use hora_base::{BaseError, GeoLocation, SolarEvents};
use tracing::debug;

use crate::error::SearchError;
use crate::source::SolarEventSource;

/// Largest supported key precision (about 0.1 mm of latitude).
const MAX_COORDINATE_DECIMALS: u32 = 9;

/// Cache sizing and key precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries before the cache is cleared.
    pub capacity: usize,
    /// Decimal places of latitude/longitude kept in the key.
    pub coordinate_decimals: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 512,
            coordinate_decimals: 4,
        }
    }
}

impl CacheConfig {
    fn validate(&self) -> Result<(), SearchError> {
        if self.capacity == 0 {
            return Err(SearchError::InvalidConfig(
                "cache capacity must be greater than zero",
            ));
        }
        if self.coordinate_decimals > MAX_COORDINATE_DECIMALS {
            return Err(SearchError::InvalidConfig(
                "coordinate_decimals must be at most 9",
            ));
        }
        Ok(())
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    lat: i64,
    lon: i64,
    date: NaiveDate,
    offset_s: i32,
}

/// Memoizing wrapper around a [`SolarEventSource`].
#[derive(Debug)]
pub struct SolarEventCache<S> {
    source: S,
    config: CacheConfig,
    entries: Mutex<HashMap<CacheKey, Result<SolarEvents, BaseError>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: SolarEventSource> SolarEventCache<S> {
    /// Wrap `source` with the given sizing.
    pub fn new(source: S, config: CacheConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            entries: Mutex::new(HashMap::with_capacity(config.capacity.min(64))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }

    /// Drop all entries. Counters are kept.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn key(&self, location: &GeoLocation, date: NaiveDate, offset: FixedOffset) -> CacheKey {
        let (lat, lon) = location.rounded_key(self.config.coordinate_decimals);
        CacheKey {
            lat,
            lon,
            date,
            offset_s: offset.local_minus_utc(),
        }
    }
}

impl<S: SolarEventSource> SolarEventSource for SolarEventCache<S> {
    fn solar_events(
        &self,
        location: &GeoLocation,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<SolarEvents, BaseError> {
        let key = self.key(location, date, offset);
        {
            let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = entries.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return cached.clone();
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(%date, lat = key.lat, lon = key.lon, "solar event cache miss");
        let result = self.source.solar_events(location, date, offset);

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.config.capacity && !entries.contains_key(&key) {
            debug!(capacity = self.config.capacity, "solar event cache full; clearing");
            entries.clear();
        }
        entries.insert(key, result.clone());
        result
    }
}
