//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

use crate::calculate::NormalizationProfile;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Upstream stats API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Shard-scoped base URL of the stats API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API bearer token. The token
    /// itself never lives in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Cached response freshness in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
}

fn default_base_url() -> String {
    "https://api.pubg.com/shards".to_string()
}

fn default_api_key_env() -> String {
    "PUBG_API_KEY".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_cache_ttl() -> u64 {
    3600
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout(),
            cache_ttl_seconds: default_cache_ttl(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub server: ServerConfig,

    /// Comparison-axis floors.
    #[serde(default)]
    pub profile: NormalizationProfile,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./data/cache")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            log_level: default_log_level(),
            upstream: UpstreamConfig::default(),
            server: ServerConfig::default(),
            profile: NormalizationProfile::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Upstream timeout must be greater than 0".to_string(),
            ));
        }

        if Url::parse(&self.upstream.base_url).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "Upstream base URL is not a valid URL: {}",
                self.upstream.base_url
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        // Zero or negative floors would reintroduce the divide-by-zero
        // the floors exist to prevent.
        for (name, floor) in [
            ("kills_floor", self.profile.kills_floor),
            ("damage_floor", self.profile.damage_floor),
            ("kd_ratio_floor", self.profile.kd_ratio_floor),
            ("survival_floor", self.profile.survival_floor),
        ] {
            if !(floor > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be greater than 0"
                )));
            }
        }

        Ok(())
    }
}
