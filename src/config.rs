use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::search::MaxDistance;

/// Runtime settings shared by the batch entry points.
///
/// # Examples
///
/// ```
/// use isochrones::Config;
///
/// let json = r#"{
///     "workers": 4,
///     "geohash_precision": 12,
///     "distance_cutoff": 900.0
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.bits_per_char, 2);
/// assert_eq!(config.distance_cutoff, Some(900.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Worker threads per batch call (default: available parallelism)
    #[serde(default = "Config::default_workers")]
    pub workers: usize,

    /// Characters per index code (default: 18)
    #[serde(default = "Config::default_geohash_precision")]
    pub geohash_precision: usize,

    /// Bits encoded by one code character; only 2 is rendered today
    #[serde(default = "Config::default_bits_per_char")]
    pub bits_per_char: u32,

    /// Coverage lattice spacing along longitude, in degrees
    #[serde(default = "Config::default_lon_step")]
    pub lon_step: f64,

    /// Coverage lattice spacing along latitude, in degrees
    #[serde(default = "Config::default_lat_step")]
    pub lat_step: f64,

    /// Largest admitted path cost (None means unbounded)
    #[serde(default)]
    pub distance_cutoff: Option<f64>,
}

impl Config {
    fn default_workers() -> usize {
        std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
    }

    const fn default_geohash_precision() -> usize {
        18
    }

    const fn default_bits_per_char() -> u32 {
        2
    }

    const fn default_lon_step() -> f64 {
        0.0008
    }

    const fn default_lat_step() -> f64 {
        0.00045
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_geohash_precision(mut self, precision: usize) -> Self {
        self.geohash_precision = precision;
        self
    }

    pub fn with_bits_per_char(mut self, bits_per_char: u32) -> Self {
        self.bits_per_char = bits_per_char;
        self
    }

    /// Set the coverage lattice spacing in degrees.
    pub fn with_lattice_step(mut self, lon_step: f64, lat_step: f64) -> Self {
        self.lon_step = lon_step;
        self.lat_step = lat_step;
        self
    }

    pub fn with_distance_cutoff(mut self, max_distance: f64) -> Self {
        self.distance_cutoff = Some(max_distance);
        self
    }

    /// The cutoff policy described by `distance_cutoff`.
    ///
    /// Without a limit this is `MaxDistance(f64::INFINITY)`, which admits
    /// every candidate since edge weights are always finite.
    pub fn search_cutoff(&self) -> MaxDistance {
        MaxDistance(self.distance_cutoff.unwrap_or(f64::INFINITY))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Worker count must be at least 1".to_string());
        }

        if self.geohash_precision == 0 {
            return Err("Geohash precision must be greater than zero".to_string());
        }

        if !matches!(self.bits_per_char, 2 | 4 | 6) {
            return Err(format!(
                "Bits per character must be 2, 4 or 6, got {}",
                self.bits_per_char
            ));
        }

        // Wider alphabets are rejected by the encoder itself.
        if self.bits_per_char == 2 && self.geohash_precision.saturating_mul(2) > 64 {
            return Err(format!(
                "Geohash precision {} with {} bits per character exceeds 64 bits",
                self.geohash_precision, self.bits_per_char
            ));
        }

        for (name, step) in [("Longitude", self.lon_step), ("Latitude", self.lat_step)] {
            if !step.is_finite() || step <= 0.0 {
                return Err(format!("{} step must be positive and finite", name));
            }
        }

        if let Some(cutoff) = self.distance_cutoff
            && cutoff.is_nan()
        {
            return Err("Distance cutoff must not be NaN".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: Self::default_workers(),
            geohash_precision: Self::default_geohash_precision(),
            bits_per_char: Self::default_bits_per_char(),
            lon_step: Self::default_lon_step(),
            lat_step: Self::default_lat_step(),
            distance_cutoff: None,
        }
    }
}
