//! Configuration file for the planetary hour tools.
//!
//! ```toml
//! [location]
//! latitude = 40.7128
//! longitude = -74.006
//!
//! [riseset]
//! zenith_deg = 90.8333
//!
//! [cache]
//! capacity = 512
//! coordinate_decimals = 4
//!
//! [tone]
//! binaural_beat_hz = 4.0
//! volume = 0.5
//! ```
//!
//! Every section and field is optional. The file is found by
//! [`resolve_path`]: an explicit path, then `$HORA_CONFIG`, then
//! `<config_dir>/hora/config.toml`.

pub mod error;

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hora_base::{DEFAULT_BINAURAL_BEAT_HZ, DEFAULT_ZENITH_DEG, GeoLocation, RiseSetConfig};
use hora_search::CacheConfig;
use serde::Deserialize;
use tracing::debug;

pub use error::ConfigError;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "HORA_CONFIG";

/// Largest accepted `coordinate_decimals`.
const MAX_COORDINATE_DECIMALS: u32 = 9;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationSection {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiseSetSection {
    #[serde(default = "default_zenith")]
    pub zenith_deg: f64,
}

impl Default for RiseSetSection {
    fn default() -> Self {
        Self {
            zenith_deg: default_zenith(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_decimals")]
    pub coordinate_decimals: u32,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            coordinate_decimals: default_decimals(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToneSection {
    #[serde(default = "default_beat")]
    pub binaural_beat_hz: f64,
    #[serde(default = "default_volume")]
    pub volume: f64,
}

impl Default for ToneSection {
    fn default() -> Self {
        Self {
            binaural_beat_hz: default_beat(),
            volume: default_volume(),
        }
    }
}

fn default_zenith() -> f64 {
    DEFAULT_ZENITH_DEG
}

fn default_capacity() -> usize {
    CacheConfig::default().capacity
}

fn default_decimals() -> u32 {
    CacheConfig::default().coordinate_decimals
}

fn default_beat() -> f64 {
    DEFAULT_BINAURAL_BEAT_HZ
}

fn default_volume() -> f64 {
    0.5
}

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoraConfig {
    #[serde(default)]
    pub location: LocationSection,
    #[serde(default)]
    pub riseset: RiseSetSection,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub tone: ToneSection,
}

impl HoraConfig {
    /// Parse and validate configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, Path::new("<string>"))
    }

    /// Read, parse and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Self::parse(&text, path)
    }

    /// Load from the resolved path, or return defaults.
    ///
    /// A missing file is only tolerated at the default location; an explicit
    /// or `$HORA_CONFIG` path that does not exist is an error.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var_os(CONFIG_ENV_VAR);
        let required = explicit.is_some() || env.as_ref().is_some_and(|v| !v.is_empty());
        let Some(path) = resolve_path(explicit, env, dirs::config_dir()) else {
            debug!("no configuration directory; using defaults");
            return Ok(Self::default());
        };
        match Self::load(&path) {
            Err(ConfigError::Io { source, .. })
                if !required && source.kind() == ErrorKind::NotFound =>
            {
                debug!(path = %path.display(), "no configuration file; using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that the TOML types cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => {
                GeoLocation::new(lat, lon)
                    .map_err(|_| ConfigError::Invalid("location out of range"))?;
            }
            (None, None) => {}
            _ => {
                return Err(ConfigError::Invalid(
                    "location needs both latitude and longitude",
                ));
            }
        }
        let z = self.riseset.zenith_deg;
        if !z.is_finite() || z <= 0.0 || z >= 180.0 {
            return Err(ConfigError::Invalid("zenith_deg must be in (0, 180)"));
        }
        if self.cache.capacity == 0 {
            return Err(ConfigError::Invalid("cache capacity must be greater than zero"));
        }
        if self.cache.coordinate_decimals > MAX_COORDINATE_DECIMALS {
            return Err(ConfigError::Invalid("coordinate_decimals must be at most 9"));
        }
        let beat = self.tone.binaural_beat_hz;
        if !beat.is_finite() || beat < 0.0 {
            return Err(ConfigError::Invalid("binaural_beat_hz must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.tone.volume) {
            return Err(ConfigError::Invalid("volume must be in [0, 1]"));
        }
        Ok(())
    }

    /// The configured default location, if both coordinates are set.
    pub fn location(&self) -> Option<GeoLocation> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => GeoLocation::new(lat, lon).ok(),
            _ => None,
        }
    }

    pub fn riseset_config(&self) -> RiseSetConfig {
        RiseSetConfig {
            zenith_deg: self.riseset.zenith_deg,
        }
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            capacity: self.cache.capacity,
            coordinate_decimals: self.cache.coordinate_decimals,
        }
    }
}

/// Pick the configuration file path.
///
/// Order: `explicit`, then a non-empty `env` value, then
/// `config_dir/hora/config.toml`. `None` when none apply.
pub fn resolve_path(
    explicit: Option<&Path>,
    env: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    if let Some(v) = env.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(v));
    }
    config_dir.map(|d| d.join("hora").join("config.toml"))
}
