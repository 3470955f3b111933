//! Configuration management for the explorer
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::ExplorerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// AI backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Discovery (explore more / search) settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// Map viewport settings
    #[serde(default)]
    pub map: MapConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// AI backend configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// API key for the generative language endpoint
    pub api_key: Option<String>,
    /// Base URL of the generative language REST API
    #[serde(default = "default_backend_base_url")]
    pub base_url: String,
    /// Model used for every generation request
    #[serde(default = "default_backend_model")]
    pub model: String,
    /// Upper bound for a single adapter call in seconds
    #[serde(default = "default_backend_timeout")]
    pub timeout_seconds: u32,
}

/// Discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Number of locations requested by "explore more"
    #[serde(default = "default_explore_count")]
    pub explore_count: u32,
    /// Number of locations requested by a themed search
    #[serde(default = "default_search_count")]
    pub search_count: u32,
    /// How long a transient notice stays visible
    #[serde(default = "default_notice_seconds")]
    pub notice_seconds: u32,
}

/// Map viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Zoom level used when a location is selected
    #[serde(default = "default_detail_zoom")]
    pub detail_zoom: u8,
    /// Zoom level of the initial overview
    #[serde(default = "default_overview_zoom")]
    pub overview_zoom: u8,
    /// Latitude of the initial overview center
    #[serde(default = "default_overview_lat")]
    pub overview_lat: f64,
    /// Longitude of the initial overview center
    #[serde(default = "default_overview_lng")]
    pub overview_lng: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory with the built frontend
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

// Default value functions
fn default_backend_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_backend_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_backend_timeout() -> u32 {
    15
}

fn default_explore_count() -> u32 {
    4
}

fn default_search_count() -> u32 {
    3
}

fn default_notice_seconds() -> u32 {
    4
}

fn default_detail_zoom() -> u8 {
    8
}

fn default_overview_zoom() -> u8 {
    5
}

fn default_overview_lat() -> f64 {
    34.0
}

fn default_overview_lng() -> f64 {
    108.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "frontend/dist".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_backend_base_url(),
            model: default_backend_model(),
            timeout_seconds: default_backend_timeout(),
        }
    }
}

impl BackendConfig {
    /// Timeout applied to every adapter call
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            explore_count: default_explore_count(),
            search_count: default_search_count(),
            notice_seconds: default_notice_seconds(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            detail_zoom: default_detail_zoom(),
            overview_zoom: default_overview_zoom(),
            overview_lat: default_overview_lat(),
            overview_lng: default_overview_lng(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            discovery: DiscoveryConfig::default(),
            map: MapConfig::default(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // EXPLORER__BACKEND__API_KEY and friends
        builder = builder.add_source(
            Environment::with_prefix("EXPLORER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ExplorerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.backend.api_key.is_none() {
            config.backend.api_key = std::env::var("GEMINI_API_KEY").ok();
        }

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("china-explorer").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.backend.base_url.is_empty() {
            self.backend.base_url = default_backend_base_url();
        }
        if self.backend.model.is_empty() {
            self.backend.model = default_backend_model();
        }
        if self.backend.timeout_seconds == 0 {
            self.backend.timeout_seconds = default_backend_timeout();
        }
        if self.discovery.explore_count == 0 {
            self.discovery.explore_count = default_explore_count();
        }
        if self.discovery.search_count == 0 {
            self.discovery.search_count = default_search_count();
        }
        if self.discovery.notice_seconds == 0 {
            self.discovery.notice_seconds = default_notice_seconds();
        }
        if self.map.detail_zoom == 0 {
            self.map.detail_zoom = default_detail_zoom();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the backend API key when one is configured
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.backend.api_key {
            if api_key.trim().is_empty() {
                return Err(ExplorerError::config(
                    "Backend API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() < 8 {
                return Err(ExplorerError::config(
                    "Backend API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.backend.timeout_seconds > 120 {
            return Err(
                ExplorerError::config("Backend timeout cannot exceed 120 seconds").into(),
            );
        }

        if self.discovery.explore_count > 20 || self.discovery.search_count > 20 {
            return Err(ExplorerError::config(
                "Discovery counts cannot exceed 20 locations per request",
            )
            .into());
        }

        if self.discovery.notice_seconds > 60 {
            return Err(ExplorerError::config("Notice duration cannot exceed 60 seconds").into());
        }

        if self.map.detail_zoom > 19 || self.map.overview_zoom > 19 {
            return Err(ExplorerError::config("Zoom levels cannot exceed 19").into());
        }

        if !(-90.0..=90.0).contains(&self.map.overview_lat)
            || !(-180.0..=180.0).contains(&self.map.overview_lng)
        {
            return Err(
                ExplorerError::config("Overview center must be a valid coordinate").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ExplorerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ExplorerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(ExplorerError::config(
                "Backend base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExplorerConfig::default();
        assert_eq!(
            config.backend.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.backend.timeout(), Duration::from_secs(15));
        assert_eq!(config.discovery.explore_count, 4);
        assert_eq!(config.discovery.search_count, 3);
        assert_eq!(config.map.detail_zoom, 8);
        assert_eq!(config.map.overview_zoom, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.backend.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = ExplorerConfig::default();
        config.backend.api_key = Some("abc".to_string());
        let result = config.validate_api_key();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = ExplorerConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = ExplorerConfig::default();
        config.backend.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_base_url_scheme() {
        let mut config = ExplorerConfig::default();
        config.backend.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_zeroes() {
        let mut config = ExplorerConfig::default();
        config.backend.timeout_seconds = 0;
        config.discovery.explore_count = 0;
        config.logging.format = String::new();
        config.apply_defaults();
        assert_eq!(config.backend.timeout_seconds, 15);
        assert_eq!(config.discovery.explore_count, 4);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = std::env::temp_dir().join(format!("china-explorer-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            "[discovery]\nexplore_count = 6\n\n[map]\ndetail_zoom = 9\n",
        )
        .unwrap();

        let config = ExplorerConfig::load_from_path(Some(path)).unwrap();
        assert_eq!(config.discovery.explore_count, 6);
        assert_eq!(config.discovery.search_count, 3);
        assert_eq!(config.map.detail_zoom, 9);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_config_path_generation() {
        let path = ExplorerConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("china-explorer"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
