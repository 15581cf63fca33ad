//! Request-scoped inputs to the scorer and predictor

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{RiskPreference, Season, WaterLevel};

/// Live weather reading supplied by the weather adapter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LiveWeather {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
}

/// A farmer's profile for one recommendation request.
///
/// Built once per request by the caller; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerQuery {
    pub state: String,
    pub season: Season,
    pub soil_type: String,
    pub water_availability: WaterLevel,
    pub ph: f64,
    /// Total budget in rupees; the budget branch is skipped when absent
    pub budget: Option<Decimal>,
    pub farm_size_hectares: Decimal,
    /// The risk branch is skipped when absent
    pub risk_preference: Option<RiskPreference>,
    pub live_weather: Option<LiveWeather>,
}

/// Inputs to a yield prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldInput {
    pub crop: String,
    pub state: String,
    /// Soil nitrogen, kg/hectare
    pub nitrogen: f64,
    /// Soil phosphorus, kg/hectare
    pub phosphorus: f64,
    /// Soil potassium, kg/hectare
    pub potassium: f64,
    pub ph: f64,
    /// Annualized rainfall in mm
    pub rainfall_mm: f64,
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
    pub area_hectares: f64,
    /// Pre-computed satellite multiplier; treated as 1.0 when absent
    pub satellite_factor: Option<f64>,
}
