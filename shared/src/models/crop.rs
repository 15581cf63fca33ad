//! Crop reference models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{RiskLevel, Season, WaterLevel};

/// Agronomic and economic profile of a crop.
///
/// One record carries both the attributes the suitability scorer reads and
/// the ones the yield predictor reads, so the two can never disagree about
/// water need, pH band or seasons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropProfile {
    /// Lowercase crop name, e.g. `rice`
    pub id: String,
    pub seasons: Vec<Season>,
    pub water_need: WaterLevel,
    pub soil_types: Vec<String>,
    pub ph_range: PhRange,
    pub investment_per_hectare: Decimal,
    pub expected_revenue_per_hectare: Decimal,
    pub duration_days: u32,
    pub risk_level: RiskLevel,
    /// Average yield in kg/hectare
    pub avg_yield_per_hectare: f64,
    /// Optimal nitrogen, kg/hectare
    pub optimal_nitrogen: f64,
    /// Optimal phosphorus, kg/hectare
    pub optimal_phosphorus: f64,
    /// Optimal potassium, kg/hectare
    pub optimal_potassium: f64,
}

impl CropProfile {
    /// Display name, e.g. `Rice`
    pub fn display_name(&self) -> String {
        title_case(&self.id)
    }

    pub fn grows_in(&self, season: Season) -> bool {
        self.seasons.contains(&season)
    }

    pub fn season_list(&self) -> String {
        self.seasons
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Inclusive soil pH band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PhRange {
    pub min: f64,
    pub max: f64,
}

impl PhRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, ph: f64) -> bool {
        ph >= self.min && ph <= self.max
    }

    /// Distance in pH units outside the band, zero when inside
    pub fn distance(&self, ph: f64) -> f64 {
        if ph < self.min {
            self.min - ph
        } else if ph > self.max {
            ph - self.max
        } else {
            0.0
        }
    }
}

/// Capitalize each whitespace-separated word
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
