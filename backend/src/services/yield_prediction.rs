//! Yield prediction service
//!
//! Gathers optional satellite and live weather readings for the state, then
//! hands a fully resolved input to the configured predictor.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{
    satellite_yield_factor, validate_area, validate_temperature, ReferenceData, SatelliteFactor,
    SatelliteSummary, YieldInput, YieldPrediction, YieldPredictor,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::NasaPowerClient;
use crate::services::weather::WeatherService;

/// Yield prediction service
#[derive(Clone)]
pub struct YieldPredictionService {
    reference: Arc<ReferenceData>,
    predictor: Arc<dyn YieldPredictor>,
    weather: WeatherService,
    satellite_client: Option<NasaPowerClient>,
}

/// Input for a yield prediction
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct YieldPredictionInput {
    #[validate(length(min = 1, max = 64, message = "Crop is required"))]
    pub crop: String,
    #[validate(length(min = 1, max = 64, message = "State is required"))]
    pub state: String,
    #[serde(default = "default_nitrogen")]
    #[validate(range(min = 0.0, message = "Nitrogen cannot be negative"))]
    pub nitrogen: f64,
    #[serde(default = "default_phosphorus")]
    #[validate(range(min = 0.0, message = "Phosphorus cannot be negative"))]
    pub phosphorus: f64,
    #[serde(default = "default_potassium")]
    #[validate(range(min = 0.0, message = "Potassium cannot be negative"))]
    pub potassium: f64,
    #[serde(default = "default_ph")]
    #[validate(range(min = 0.0, max = 14.0, message = "Soil pH must be between 0 and 14"))]
    pub ph: f64,
    #[serde(default = "default_rainfall")]
    #[validate(range(min = 0.0, message = "Rainfall cannot be negative"))]
    pub rainfall: f64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_humidity")]
    #[validate(range(min = 0.0, max = 100.0, message = "Humidity must be between 0 and 100%"))]
    pub humidity: f64,
    #[serde(default = "default_area")]
    pub area: f64,
    #[serde(default = "default_true")]
    pub use_live_weather: bool,
    #[serde(default = "default_true")]
    pub use_satellite_data: bool,
}

fn default_nitrogen() -> f64 {
    80.0
}

fn default_phosphorus() -> f64 {
    40.0
}

fn default_potassium() -> f64 {
    40.0
}

fn default_ph() -> f64 {
    6.5
}

fn default_rainfall() -> f64 {
    800.0
}

fn default_temperature() -> f64 {
    25.0
}

fn default_humidity() -> f64 {
    70.0
}

fn default_area() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

/// Yield prediction response body
#[derive(Debug, Serialize)]
pub struct YieldPredictionResponse {
    pub success: bool,
    #[serde(flatten)]
    pub prediction: YieldPrediction,
    pub state: String,
    pub area_hectares: f64,
    /// Name of the predictor that produced the result
    pub model: String,
    pub data_sources: Vec<String>,
    /// "live" when live weather replaced the supplied temperature and humidity
    pub weather_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satellite: Option<SatelliteSummary>,
}

impl YieldPredictionService {
    /// Create a new YieldPredictionService
    pub fn new(
        reference: Arc<ReferenceData>,
        predictor: Arc<dyn YieldPredictor>,
        weather: WeatherService,
        satellite_client: Option<NasaPowerClient>,
    ) -> Self {
        Self {
            reference,
            predictor,
            weather,
            satellite_client,
        }
    }

    /// Predict yield for a crop in a state
    pub async fn predict(&self, input: YieldPredictionInput) -> AppResult<YieldPredictionResponse> {
        input.validate()?;
        validate_area(input.area).map_err(|msg| AppError::invalid_field("area", msg))?;
        validate_temperature(input.temperature)
            .map_err(|msg| AppError::invalid_field("temperature", msg))?;

        // Unknown crops fail before any external lookup
        if self.reference.crop(&input.crop).is_none() {
            return Err(AppError::CropNotFound(input.crop.trim().to_string()));
        }

        let mut data_sources = vec!["Crop reference tables".to_string()];

        let satellite = if input.use_satellite_data {
            self.satellite_summary(&input.state).await
        } else {
            None
        };
        let satellite_factor: Option<SatelliteFactor> =
            satellite.as_ref().map(satellite_yield_factor);
        if satellite_factor.is_some() {
            data_sources.push("NASA POWER satellite data".to_string());
        }

        let live = if input.use_live_weather {
            self.weather.live_weather(&input.state).await
        } else {
            None
        };
        let (temperature, humidity) = match &live {
            Some(weather) => {
                data_sources.push("OpenWeatherMap live weather".to_string());
                (weather.temperature, weather.humidity)
            }
            None => (input.temperature, input.humidity),
        };

        let yield_input = YieldInput {
            crop: input.crop.trim().to_string(),
            state: input.state.trim().to_string(),
            nitrogen: input.nitrogen,
            phosphorus: input.phosphorus,
            potassium: input.potassium,
            ph: input.ph,
            rainfall_mm: input.rainfall,
            temperature_celsius: temperature,
            humidity_percent: humidity,
            area_hectares: input.area,
            satellite_factor: satellite_factor.as_ref().map(|s| s.factor),
        };

        let weather_source = match live {
            Some(_) => "live",
            None => "input",
        };

        let mut prediction = self.predictor.predict(&yield_input)?;
        if let Some(factor) = satellite_factor {
            prediction.insights.splice(0..0, factor.insights);
        }

        tracing::info!(
            crop = %prediction.crop,
            state = %yield_input.state,
            predicted_yield = prediction.predicted_yield,
            category = %prediction.category,
            model = self.predictor.name(),
            "Predicted crop yield"
        );

        Ok(YieldPredictionResponse {
            success: true,
            prediction,
            state: yield_input.state,
            area_hectares: input.area,
            model: self.predictor.name().to_string(),
            data_sources,
            weather_source: weather_source.to_string(),
            satellite,
        })
    }

    /// NASA POWER summary for a state.
    ///
    /// Errors when the state is unknown or satellite data is disabled.
    pub async fn satellite_for_state(&self, state: &str) -> AppResult<SatelliteSummary> {
        let profile = self
            .reference
            .state(state)
            .ok_or_else(|| AppError::NotFound(format!("State '{}'", state.trim())))?;
        let client = self
            .satellite_client
            .as_ref()
            .ok_or(AppError::SatelliteServiceUnavailable)?;

        client.get_summary(&profile.location).await
    }

    /// Satellite summary for a state, degrading to None on any failure
    async fn satellite_summary(&self, state: &str) -> Option<SatelliteSummary> {
        self.satellite_client.as_ref()?;

        match self.satellite_for_state(state).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("Satellite data unavailable for {}: {}", state.trim(), e);
                None
            }
        }
    }
}
