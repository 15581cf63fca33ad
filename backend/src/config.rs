//! Configuration management for the Agri Advisor backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with AGRI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Live weather (OpenWeatherMap) configuration
    pub weather: WeatherConfig,

    /// NASA POWER satellite data configuration
    pub satellite: SatelliteConfig,

    /// Reference table configuration
    #[serde(default)]
    pub reference: ReferenceConfig,
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
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key; live weather is disabled when empty
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SatelliteConfig {
    /// Whether NASA POWER lookups are made at all
    pub enabled: bool,

    /// NASA POWER daily point endpoint
    pub api_endpoint: String,

    /// Days of history averaged into a summary
    pub lookback_days: i64,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReferenceConfig {
    /// JSON file replacing the built-in reference tables
    pub data_path: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", DEFAULT_WEATHER_ENDPOINT)?
            .set_default("weather.api_key", "")?
            .set_default("weather.timeout_secs", 5)?
            .set_default("satellite.enabled", true)?
            .set_default("satellite.api_endpoint", DEFAULT_SATELLITE_ENDPOINT)?
            .set_default("satellite.lookback_days", 30)?
            .set_default("satellite.timeout_secs", 15)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Whether live weather lookups can be made
    pub fn weather_enabled(&self) -> bool {
        !self.weather.api_key.trim().is_empty()
    }
}

const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_SATELLITE_ENDPOINT: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            weather: WeatherConfig::default(),
            satellite: SatelliteConfig::default(),
            reference: ReferenceConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            api_key: String::new(),
            timeout_secs: 5,
        }
    }
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_endpoint: DEFAULT_SATELLITE_ENDPOINT.to_string(),
            lookback_days: 30,
            timeout_secs: 15,
        }
    }
}
