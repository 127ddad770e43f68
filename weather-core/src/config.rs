use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    provider::{geocoding, open_meteo},
    units::Units,
};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Provider base URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub forecast_url: String,
    pub geocoding_url: String,
    pub reverse_geocoding_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast_url: open_meteo::DEFAULT_FORECAST_URL.to_string(),
            geocoding_url: geocoding::DEFAULT_GEOCODING_URL.to_string(),
            reverse_geocoding_url: geocoding::DEFAULT_REVERSE_GEOCODING_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// units = "imperial"
/// default_city = "Boston"
/// request_timeout_secs = 5
///
/// [endpoints]
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Preferred units; metric when unset.
    pub units: Option<Units>,

    /// City used by `weather show` when none is given.
    pub default_city: Option<String>,

    /// Per-request HTTP timeout in seconds; 10 when unset, never below 1.
    pub request_timeout_secs: Option<u64>,

    pub endpoints: Endpoints,
}

impl Config {
    pub fn units(&self) -> Units {
        self.units.unwrap_or_default()
    }

    pub fn set_units(&mut self, units: Units) {
        self.units = Some(units);
    }

    /// Store the default city; blank input clears it.
    pub fn set_default_city(&mut self, city: &str) {
        let city = city.trim();
        self.default_city = (!city.is_empty()).then(|| city.to_string());
    }

    pub fn request_timeout(&self) -> Duration {
        let secs = self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs.max(1))
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
