//! Crop recommendation service
//!
//! Builds a farmer query from request input, optionally enriches it with
//! live weather for the state, and runs the suitability scorer.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    validate_budget, validate_farm_size, CropScorer, FarmerQuery, ReferenceData, RiskPreference,
    ScoredCrop, Season, WaterLevel,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::weather::CurrentWeather;
use crate::services::weather::WeatherService;

/// Crop recommendation service
#[derive(Clone)]
pub struct RecommendationService {
    reference: Arc<ReferenceData>,
    weather: WeatherService,
}

/// Input for a crop recommendation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecommendationInput {
    #[validate(length(min = 1, max = 64, message = "State is required"))]
    pub state: String,
    pub season: Season,
    #[serde(default = "default_soil_type")]
    #[validate(length(min = 1, max = 64, message = "Soil type cannot be empty"))]
    pub soil_type: String,
    #[serde(default = "default_water_availability")]
    pub water_availability: WaterLevel,
    #[serde(default = "default_ph")]
    #[validate(range(min = 0.0, max = 14.0, message = "Soil pH must be between 0 and 14"))]
    pub ph: f64,
    #[serde(default)]
    pub budget: Option<Decimal>,
    #[serde(default = "default_farm_size")]
    pub farm_size: Decimal,
    #[serde(default)]
    pub risk_preference: Option<RiskPreference>,
    #[serde(default = "default_true")]
    pub use_live_weather: bool,
}

fn default_soil_type() -> String {
    "Loamy".to_string()
}

fn default_water_availability() -> WaterLevel {
    WaterLevel::Medium
}

fn default_ph() -> f64 {
    6.5
}

fn default_farm_size() -> Decimal {
    Decimal::ONE
}

fn default_true() -> bool {
    true
}

/// Recommendation response body
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub state: String,
    pub season: Season,
    pub recommendations: Vec<ScoredCrop>,
    pub total_crops_evaluated: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<CurrentWeather>,
    /// "live" when live weather adjusted the scores, otherwise "none"
    pub weather_source: String,
}

impl RecommendationService {
    /// Create a new RecommendationService
    pub fn new(reference: Arc<ReferenceData>, weather: WeatherService) -> Self {
        Self { reference, weather }
    }

    /// Validate input and build the immutable query
    pub fn build_query(&self, input: &RecommendationInput) -> AppResult<FarmerQuery> {
        input.validate()?;
        validate_farm_size(input.farm_size)
            .map_err(|msg| AppError::invalid_field("farm_size", msg))?;
        if let Some(budget) = input.budget {
            validate_budget(budget).map_err(|msg| AppError::invalid_field("budget", msg))?;
        }

        Ok(FarmerQuery {
            state: input.state.trim().to_string(),
            season: input.season,
            soil_type: input.soil_type.trim().to_string(),
            water_availability: input.water_availability,
            ph: input.ph,
            budget: input.budget,
            farm_size_hectares: input.farm_size,
            risk_preference: input.risk_preference,
            live_weather: None,
        })
    }

    /// Recommend crops for a farmer
    pub async fn recommend(&self, input: RecommendationInput) -> AppResult<RecommendationResponse> {
        let query = self.build_query(&input)?;

        let weather = if input.use_live_weather {
            self.weather.live_weather(&query.state).await
        } else {
            None
        };
        let query = FarmerQuery {
            live_weather: weather.as_ref().map(CurrentWeather::to_live_weather),
            ..query
        };
        let recommendations = CropScorer::new(&self.reference).recommend(&query);

        tracing::info!(
            state = %query.state,
            season = %query.season,
            live_weather = weather.is_some(),
            count = recommendations.len(),
            "Scored crop recommendations"
        );

        if recommendations.is_empty() {
            return Err(AppError::NoSuitableCrops);
        }

        let weather_source = match weather {
            Some(_) => "live",
            None => "none",
        };

        Ok(RecommendationResponse {
            success: true,
            state: query.state,
            season: query.season,
            recommendations,
            total_crops_evaluated: self.reference.crops.len(),
            weather_source: weather_source.to_string(),
            weather,
        })
    }
}
