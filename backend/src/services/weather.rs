//! Weather service for live conditions and farming advice

use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::Serialize;
use shared::{ReferenceData, StateProfile};

use crate::error::{AppError, AppResult};
use crate::external::weather::{CurrentWeather, WeatherClient};

/// Maximum number of advice items returned
pub const MAX_ADVICE_ITEMS: usize = 5;

/// Weather service for state-level live conditions
#[derive(Clone)]
pub struct WeatherService {
    reference: Arc<ReferenceData>,
    weather_client: Option<WeatherClient>,
}

/// Severity of a farming advice item
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdviceKind {
    Danger,
    Warning,
    Info,
    Success,
}

/// A farming advice item derived from current weather
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FarmingAdvice {
    pub kind: AdviceKind,
    pub title: String,
    pub message: String,
}

impl FarmingAdvice {
    fn new(kind: AdviceKind, title: &str, message: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// A weather alert for farmers
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherAlert {
    pub severity: AdviceKind,
    pub icon: String,
    pub title: String,
    pub message: String,
}

impl WeatherAlert {
    fn new(severity: AdviceKind, icon: &str, title: &str, message: String) -> Self {
        Self {
            severity,
            icon: icon.to_string(),
            title: title.to_string(),
            message,
        }
    }
}

/// Conditions the alerts were derived from
#[derive(Debug, Serialize)]
pub struct AlertConditions {
    pub temperature: f64,
    pub condition: String,
    pub humidity: f64,
}

/// Weather alerts for a state
#[derive(Debug, Serialize)]
pub struct WeatherAlertsResponse {
    pub success: bool,
    pub state: String,
    pub city: String,
    pub alerts: Vec<WeatherAlert>,
    pub current: AlertConditions,
}

/// Weather response for a state
#[derive(Debug, Serialize)]
pub struct StateWeatherResponse {
    pub success: bool,
    pub state: String,
    pub city: String,
    pub weather: CurrentWeather,
    pub farming_advice: Vec<FarmingAdvice>,
    pub source: String,
}

impl WeatherService {
    /// Create a new WeatherService
    pub fn new(reference: Arc<ReferenceData>, weather_client: Option<WeatherClient>) -> Self {
        Self {
            reference,
            weather_client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.weather_client.is_some()
    }

    /// Current weather for a state's reference city.
    ///
    /// Errors when the state is unknown or live weather is not configured.
    pub async fn current_for_state(&self, state: &str) -> AppResult<CurrentWeather> {
        let profile = self
            .reference
            .state(state)
            .ok_or_else(|| AppError::NotFound(format!("State '{}'", state.trim())))?;
        let client = self
            .weather_client
            .as_ref()
            .ok_or(AppError::WeatherServiceUnavailable)?;

        client.get_current_weather(&profile.location).await
    }

    /// Live weather for a state, degrading to None on any failure
    pub async fn live_weather(&self, state: &str) -> Option<CurrentWeather> {
        self.weather_client.as_ref()?;

        match self.current_for_state(state).await {
            Ok(weather) => Some(weather),
            Err(e) => {
                tracing::warn!("Live weather unavailable for {}: {}", state.trim(), e);
                None
            }
        }
    }

    /// Current weather plus farming advice for a state
    pub async fn state_report(&self, state: &str) -> AppResult<StateWeatherResponse> {
        let weather = self.current_for_state(state).await?;
        let profile = self.state_profile(state)?;

        Ok(StateWeatherResponse {
            success: true,
            state: profile.name.clone(),
            city: profile.city.clone(),
            farming_advice: farming_advice(&weather, Utc::now().month()),
            weather,
            source: "live".to_string(),
        })
    }

    /// Weather alerts for a state
    pub async fn state_alerts(&self, state: &str) -> AppResult<WeatherAlertsResponse> {
        let weather = self.current_for_state(state).await?;
        let profile = self.state_profile(state)?;

        Ok(WeatherAlertsResponse {
            success: true,
            state: profile.name.clone(),
            city: profile.city.clone(),
            alerts: alerts(&weather),
            current: AlertConditions {
                temperature: weather.temperature,
                condition: weather.condition,
                humidity: weather.humidity,
            },
        })
    }

    fn state_profile(&self, state: &str) -> AppResult<&StateProfile> {
        self.reference
            .state(state)
            .ok_or_else(|| AppError::NotFound(format!("State '{}'", state.trim())))
    }
}

fn is_raining(weather: &CurrentWeather) -> bool {
    weather.condition.contains("Rain") || weather.rain_1h_mm.is_some_and(|mm| mm > 0.0)
}

/// Alerts for severe conditions, or a single all-clear item
pub fn alerts(weather: &CurrentWeather) -> Vec<WeatherAlert> {
    let mut alerts = Vec::new();

    if weather.temperature > 40.0 {
        alerts.push(WeatherAlert::new(
            AdviceKind::Danger,
            "🔥",
            "Heat Wave Alert",
            format!(
                "Extreme heat ({:.1}°C). Protect crops and avoid outdoor work.",
                weather.temperature
            ),
        ));
    }

    if is_raining(weather) {
        alerts.push(WeatherAlert::new(
            AdviceKind::Warning,
            "🌧️",
            "Rain Alert",
            "Heavy rain expected. Secure harvested crops and check drainage.".to_string(),
        ));
    }

    if weather.humidity > 90.0 {
        alerts.push(WeatherAlert::new(
            AdviceKind::Info,
            "💦",
            "High Humidity",
            "Fungal disease risk is high. Monitor crops closely.".to_string(),
        ));
    }

    if weather.wind_speed_kmh > 35.0 {
        alerts.push(WeatherAlert::new(
            AdviceKind::Warning,
            "💨",
            "Strong Wind Alert",
            "Winds may damage crops. Support tall plants.".to_string(),
        ));
    }

    if alerts.is_empty() {
        alerts.push(WeatherAlert::new(
            AdviceKind::Success,
            "✅",
            "Good Conditions",
            "Weather is favourable for farming activities.".to_string(),
        ));
    }

    alerts
}

/// Farming advice for current conditions, at most five items
pub fn farming_advice(weather: &CurrentWeather, month: u32) -> Vec<FarmingAdvice> {
    let mut advice = Vec::new();
    let temp = weather.temperature;

    if temp > 40.0 {
        advice.push(FarmingAdvice::new(
            AdviceKind::Danger,
            "Extreme Heat Warning",
            "Avoid fieldwork 11 AM - 4 PM. Irrigate early morning or evening and shade nurseries.",
        ));
    } else if temp > 35.0 {
        advice.push(FarmingAdvice::new(
            AdviceKind::Warning,
            "Hot Weather",
            "Increase irrigation frequency. Apply mulch to retain soil moisture.",
        ));
    } else if temp < 10.0 {
        advice.push(FarmingAdvice::new(
            AdviceKind::Warning,
            "Frost Risk",
            "Protect frost-sensitive crops. Cover seedlings at night.",
        ));
    } else if (20.0..=30.0).contains(&temp) {
        advice.push(FarmingAdvice::new(
            AdviceKind::Success,
            "Ideal Temperature",
            "Good conditions for most farming activities.",
        ));
    }

    if is_raining(weather) {
        advice.push(FarmingAdvice::new(
            AdviceKind::Info,
            "Rain Expected",
            "Postpone pesticide and fertilizer spraying. Check field drainage.",
        ));
    } else if weather.condition == "Clear" {
        advice.push(FarmingAdvice::new(
            AdviceKind::Success,
            "Clear Weather",
            "Good for spraying, harvesting and drying crops.",
        ));
    }

    if weather.humidity > 85.0 {
        advice.push(FarmingAdvice::new(
            AdviceKind::Warning,
            "High Humidity",
            "Watch for fungal diseases. Keep plant spacing wide enough for air flow.",
        ));
    }

    if weather.wind_speed_kmh > 30.0 {
        advice.push(FarmingAdvice::new(
            AdviceKind::Warning,
            "Strong Winds",
            "Avoid spraying. Secure poly houses and support tall crops.",
        ));
    }

    match month {
        6 | 7 => advice.push(FarmingAdvice::new(
            AdviceKind::Info,
            "Kharif Season",
            "Sowing time for paddy, maize, cotton and soybean.",
        )),
        10 | 11 => advice.push(FarmingAdvice::new(
            AdviceKind::Info,
            "Rabi Season",
            "Sowing time for wheat, mustard and chickpea.",
        )),
        _ => {}
    }

    advice.truncate(MAX_ADVICE_ITEMS);
    advice
}
