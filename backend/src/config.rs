//! Configuration management for the Raincast advisory service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with RAINCAST_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::external::Provider;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key, used for geocoding and the 3 hour forecast
    pub api_key: String,

    /// OpenWeatherMap data endpoint
    pub openweathermap_url: String,

    /// OpenWeatherMap geocoding endpoint
    pub geocoding_url: String,

    /// Open-Meteo forecast endpoint (no key required)
    pub open_meteo_url: String,

    /// Upstream request timeout
    pub request_timeout_secs: u64,

    /// Provider used when a request does not name one
    pub default_provider: Provider,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("RAINCAST_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_key", "")?
            .set_default(
                "weather.openweathermap_url",
                "https://api.openweathermap.org/data/2.5",
            )?
            .set_default("weather.geocoding_url", "https://api.openweathermap.org/geo/1.0")?
            .set_default("weather.open_meteo_url", "https://api.open-meteo.com/v1")?
            .set_default("weather.request_timeout_secs", 10)?
            .set_default("weather.default_provider", "openweathermap")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (RAINCAST_ prefix)
            .add_source(
                Environment::with_prefix("RAINCAST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            openweathermap_url: "https://api.openweathermap.org/data/2.5".to_string(),
            geocoding_url: "https://api.openweathermap.org/geo/1.0".to_string(),
            open_meteo_url: "https://api.open-meteo.com/v1".to_string(),
            request_timeout_secs: 10,
            default_provider: Provider::OpenWeatherMap,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}
