//! Configuration management

use crate::core::error::{Error, Result};
use crate::core::region::{Coordinates, GeoBounds, Region, MIYAKO_BOUNDS, MIYAKO_CENTER};
use crate::search::keywords::KeywordTagMap;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the ratings backend credential
pub const DEFAULT_API_KEY_ENV: &str = "FOURSQUARE_API_KEY";

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_FOURSQUARE_URL: &str = "https://api.foursquare.com/v3/places/search";

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub region: RegionConfig,
    pub overpass: OverpassConfig,
    pub ratings: RatingsConfig,
    /// Extra keyword -> tag-expression entries, merged over the built-in map
    #[serde(default)]
    pub keywords: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Display name of the area
    pub name: String,
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    /// Map centre used for browser links
    pub center_lat: f64,
    pub center_lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverpassConfig {
    /// Interpreter endpoint
    pub endpoint: String,
    /// HTTP timeout (seconds)
    pub timeout_secs: u64,
    /// `[timeout:N]` setting embedded in the query itself
    pub query_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingsConfig {
    /// Places search endpoint
    pub endpoint: String,
    /// HTTP timeout per lookup (seconds)
    pub timeout_secs: u64,
    /// Match radius around the POI (meters)
    pub radius: u32,
    /// Name of the environment variable holding the credential
    pub api_key_env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: RegionConfig::default(),
            overpass: OverpassConfig::default(),
            ratings: RatingsConfig::default(),
            keywords: BTreeMap::new(),
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            name: "宮古諸島".to_string(),
            north: MIYAKO_BOUNDS.north,
            south: MIYAKO_BOUNDS.south,
            east: MIYAKO_BOUNDS.east,
            west: MIYAKO_BOUNDS.west,
            center_lat: MIYAKO_CENTER.lat,
            center_lng: MIYAKO_CENTER.lng,
        }
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OVERPASS_URL.to_string(),
            timeout_secs: 30,
            query_timeout_secs: 25,
        }
    }
}

impl Default for RatingsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FOURSQUARE_URL.to_string(),
            timeout_secs: 5,
            radius: 1000,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl RegionConfig {
    /// Build the validated region value handed to the search components
    pub fn to_region(&self) -> Result<Region> {
        let bounds = GeoBounds::new(self.north, self.south, self.east, self.west)?;
        let center = Coordinates::new(self.center_lat, self.center_lng);
        if !center.is_valid() {
            return Err(Error::InvalidRegion {
                message: format!("center ({}, {}) is not a valid coordinate", self.center_lat, self.center_lng),
            });
        }
        Ok(Region {
            name: self.name.clone(),
            bounds,
            center,
        })
    }
}

impl OverpassConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RatingsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read the credential from the environment; blank values count as absent
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file, falling back to defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        self.region.to_region()?;
        if self.overpass.timeout_secs == 0 || self.ratings.timeout_secs == 0 {
            return Err(Error::ConfigError {
                message: "timeouts must be at least one second".to_string(),
            });
        }
        if let Some((keyword, _)) = self.keywords.iter().find(|(_, tags)| tags.is_empty()) {
            return Err(Error::ConfigError {
                message: format!("keyword '{}' maps to no tags", keyword),
            });
        }
        Ok(())
    }

    pub fn region(&self) -> Result<Region> {
        self.region.to_region()
    }

    /// Built-in keyword map with the configured entries merged over it
    pub fn keyword_map(&self) -> KeywordTagMap {
        KeywordTagMap::builtin().with_entries(self.keywords.clone())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = Self::msearch_home()?;
        Ok(home.join("config.toml"))
    }

    /// Get the msearch home directory
    pub fn msearch_home() -> Result<PathBuf> {
        // Check MSEARCH_HOME env var first
        if let Ok(home) = std::env::var("MSEARCH_HOME") {
            return Ok(PathBuf::from(home));
        }

        ProjectDirs::from("dev", "msearch", "msearch")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| Error::ConfigError {
                message: "Could not determine msearch home directory".to_string(),
            })
    }
}
