//! Weather API client for fetching live conditions
//!
//! Integrates with the OpenWeatherMap current weather API

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{round_to, GpsCoordinates, LiveWeather};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Current weather conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: i32,
    pub wind_speed_kmh: f64,
    pub condition: String,
    pub description: String,
    pub clouds: i32,
    pub visibility_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_1h_mm: Option<f64>,
}

impl CurrentWeather {
    /// The subset of conditions the crop scorer reads
    pub fn to_live_weather(&self) -> LiveWeather {
        LiveWeather {
            temperature_celsius: self.temperature,
            humidity_percent: self.humidity,
        }
    }
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    visibility: Option<i32>,
    wind: OWMWind,
    clouds: OWMClouds,
    rain: Option<OWMRain>,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    feels_like: f64,
    pressure: i32,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OWMClouds {
    all: i32,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Weather client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(&self, location: &GpsCoordinates) -> AppResult<CurrentWeather> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Weather API request failed: {}", e);
                AppError::WeatherServiceUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(convert_current_response(data))
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse) -> CurrentWeather {
    let weather = data.weather.first();

    CurrentWeather {
        timestamp: DateTime::from_timestamp(data.dt, 0).unwrap_or_else(Utc::now),
        temperature: round_to(data.main.temp, 1),
        feels_like: round_to(data.main.feels_like, 1),
        humidity: data.main.humidity,
        pressure: data.main.pressure,
        wind_speed_kmh: round_to(data.wind.speed * 3.6, 1),
        condition: weather.map(|w| w.main.clone()).unwrap_or_default(),
        description: weather.map(|w| w.description.clone()).unwrap_or_default(),
        clouds: data.clouds.all,
        visibility_km: f64::from(data.visibility.unwrap_or(10_000)) / 1000.0,
        rain_1h_mm: data.rain.and_then(|r| r.one_hour),
    }
}
