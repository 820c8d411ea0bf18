//! Configuration management for the advisory engine
//!
//! This module handles loading and validation of all engine configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::services::carbon::Granularity;
use crate::utils::error::{AdvisorError, Result};

const ENV_CATALOG_DIR: &str = "CLOUDVISOR_CATALOG_DIR";
const ENV_SNAPSHOT_DIR: &str = "CLOUDVISOR_SNAPSHOT_DIR";
const ENV_CARBON_API_BASE: &str = "CLOUDVISOR_CARBON_API_BASE";
const ENV_CARBON_API_KEY: &str = "CLOUDVISOR_CARBON_API_KEY";
const ENV_CARBON_ZONES: &str = "CLOUDVISOR_CARBON_ZONES";

/// Main configuration struct for the advisory engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Instance catalog configuration
    #[serde(default)]
    pub catalog: CatalogSettings,
    /// Cache persistence configuration
    #[serde(default)]
    pub cache: CacheSettings,
    /// Carbon-intensity API configuration
    #[serde(default)]
    pub carbon: CarbonSettings,
}

impl Settings {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AdvisorError::Config(format!("Failed to read config file: {}", e)))?;

        let mut settings: Settings = serde_yaml::from_str(&content)
            .map_err(|e| AdvisorError::Config(format!("Failed to parse config: {}", e)))?;
        settings.apply_env_overrides();

        settings.validate()?;

        debug!("Configuration loaded successfully");
        Ok(settings)
    }

    /// Load configuration from environment variables over the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut settings = Self::default();
        settings.apply_env_overrides();

        settings.validate()?;
        Ok(settings)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(ENV_CATALOG_DIR) {
            self.catalog.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var(ENV_SNAPSHOT_DIR) {
            self.cache.snapshot_dir = PathBuf::from(dir);
        }
        if let Ok(api_base) = std::env::var(ENV_CARBON_API_BASE) {
            self.carbon.api_base = api_base;
        }
        if let Ok(api_key) = std::env::var(ENV_CARBON_API_KEY) {
            self.carbon.api_key = Some(api_key);
        }
        if let Ok(zones) = std::env::var(ENV_CARBON_ZONES) {
            self.carbon.zones = zones
                .split(',')
                .map(str::trim)
                .filter(|zone| !zone.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        if self.catalog.data_dir.as_os_str().is_empty() {
            return Err(AdvisorError::Config(
                "Catalog data directory must not be empty".to_string(),
            ));
        }
        if self.cache.snapshot_dir.as_os_str().is_empty() {
            return Err(AdvisorError::Config(
                "Cache snapshot directory must not be empty".to_string(),
            ));
        }

        let api_base = Url::parse(&self.carbon.api_base)
            .map_err(|e| AdvisorError::Config(format!("Invalid carbon API base: {}", e)))?;
        if !matches!(api_base.scheme(), "http" | "https") {
            return Err(AdvisorError::Config(format!(
                "Carbon API base must be http(s), got: {}",
                api_base.scheme()
            )));
        }
        if self.carbon.zones.is_empty() {
            return Err(AdvisorError::Config(
                "At least one carbon zone must be configured".to_string(),
            ));
        }
        if self.carbon.zones.iter().any(|zone| zone.trim().is_empty()) {
            return Err(AdvisorError::Config(
                "Carbon zones must not be blank".to_string(),
            ));
        }
        if self.carbon.hourly_ttl_secs == 0 || self.carbon.monthly_ttl_secs == 0 {
            return Err(AdvisorError::Config(
                "Carbon cache TTLs must be positive".to_string(),
            ));
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AdvisorError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

/// Instance catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Directory holding one CSV listing per provider
    #[serde(default = "default_catalog_dir")]
    pub data_dir: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            data_dir: default_catalog_dir(),
        }
    }
}

/// Cache persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Directory the file-backed snapshot store writes into
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
        }
    }
}

/// Carbon-intensity API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarbonSettings {
    /// Base URL of the carbon-intensity API
    #[serde(default = "default_carbon_api_base")]
    pub api_base: String,
    /// API key sent as the `auth-token` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Grid zones to track
    #[serde(default = "default_carbon_zones")]
    pub zones: Vec<String>,
    /// Refresh interval of the hourly cache, in seconds
    #[serde(default = "default_hourly_ttl_secs")]
    pub hourly_ttl_secs: u64,
    /// Refresh interval of the monthly cache, in seconds
    #[serde(default = "default_monthly_ttl_secs")]
    pub monthly_ttl_secs: u64,
}

impl CarbonSettings {
    pub fn ttl(&self, granularity: Granularity) -> Duration {
        match granularity {
            Granularity::Hourly => Duration::from_secs(self.hourly_ttl_secs),
            Granularity::Monthly => Duration::from_secs(self.monthly_ttl_secs),
        }
    }
}

impl Default for CarbonSettings {
    fn default() -> Self {
        Self {
            api_base: default_carbon_api_base(),
            api_key: None,
            zones: default_carbon_zones(),
            hourly_ttl_secs: default_hourly_ttl_secs(),
            monthly_ttl_secs: default_monthly_ttl_secs(),
        }
    }
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from("data/catalog")
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("data/cache")
}

fn default_carbon_api_base() -> String {
    "https://api.electricitymaps.com".to_string()
}

fn default_carbon_zones() -> Vec<String> {
    crate::core::regions::tracked_zones()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_hourly_ttl_secs() -> u64 {
    3600
}

fn default_monthly_ttl_secs() -> u64 {
    86400
}
