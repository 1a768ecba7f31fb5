//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated
//! from environment variables (and a `.env` file when present) on top of
//! built-in defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default upstream for the country tools.
pub const DEFAULT_COUNTRIES_API_URL: &str = "https://restcountries.com/v3.1";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Upstream country-data API.
    pub countries: CountriesConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Upstream country-data API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesConfig {
    /// Base URL that `/name`, `/capital` and `/currency` are appended to.
    pub base_url: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for CountriesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COUNTRIES_API_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "countries-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            countries: CountriesConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(base_url) = std::env::var("MCP_COUNTRIES_API_URL") {
            info!("Using country API at {}", base_url);
            config.countries.base_url = base_url;
        }
        config.countries.base_url = config.countries.base_url.trim_end_matches('/').to_string();

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }

    /// Check the configuration for values the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.countries.base_url).map_err(|e| {
            Error::config(format!(
                "invalid country API URL '{}': {}",
                self.countries.base_url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "country API URL must be http or https, got '{}'",
                url.scheme()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_points_at_rest_countries() {
        let config = Config::default();
        assert_eq!(config.countries.base_url, "https://restcountries.com/v3.1");
        assert_eq!(config.server.name, "countries-mcp-server");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_url_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_COUNTRIES_API_URL", "http://localhost:9000/v3.1/");
        }
        let config = Config::from_env();
        assert_eq!(config.countries.base_url, "http://localhost:9000/v3.1");
        unsafe {
            std::env::remove_var("MCP_COUNTRIES_API_URL");
        }
    }

    #[test]
    fn test_api_url_default_fallback() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MCP_COUNTRIES_API_URL");
        }
        let config = Config::from_env();
        assert_eq!(config.countries.base_url, DEFAULT_COUNTRIES_API_URL);
    }

    #[test]
    fn test_server_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "geo");
        }
        let config = Config::from_env();
        assert_eq!(config.server.name, "geo");
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
        }
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = Config::default();

        config.countries.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.countries.base_url = "ftp://example.com/v3.1".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
