//! Yield prediction
//!
//! The predicted yield is the crop's base yield multiplied by independent
//! soil, weather, regional and (optionally) satellite factors.

use std::sync::Arc;

use crate::error::AdvisoryError;
use crate::models::{
    classify_yield, CropProfile, PhRange, YieldCategory, YieldFactors, YieldInput, YieldPrediction,
};
use crate::reference::ReferenceData;
use crate::types::{round_to, WaterLevel};

/// Nutrient ratios are capped so excess fertilizer cannot inflate yield
pub const MAX_NUTRIENT_RATIO: f64 = 1.2;
/// A nutrient below this share of its optimum triggers a low-nutrient insight
pub const LOW_NUTRIENT_SHARE: f64 = 0.7;
pub const MAX_CONFIDENCE: f64 = 95.0;
/// Below this rainfall a high-water crop needs irrigation advice
const IRRIGATION_RAINFALL_MM: f64 = 800.0;

/// A yield prediction strategy
pub trait YieldPredictor: Send + Sync {
    /// Short identifier reported alongside predictions
    fn name(&self) -> &'static str;

    fn predict(&self, input: &YieldInput) -> Result<YieldPrediction, AdvisoryError>;
}

/// Rule-based predictor over the reference tables
#[derive(Debug, Clone)]
pub struct RuleBasedPredictor {
    reference: Arc<ReferenceData>,
}

impl RuleBasedPredictor {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }
}

impl YieldPredictor for RuleBasedPredictor {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    fn predict(&self, input: &YieldInput) -> Result<YieldPrediction, AdvisoryError> {
        let crop = self
            .reference
            .crop(&input.crop)
            .ok_or_else(|| AdvisoryError::CropNotFound(input.crop.clone()))?;

        let soil = soil_factor(
            crop,
            input.nitrogen,
            input.phosphorus,
            input.potassium,
            input.ph,
        );
        let weather = weather_factor(
            crop.water_need,
            input.rainfall_mm,
            input.temperature_celsius,
            input.humidity_percent,
        );
        let state = self
            .reference
            .state(&input.state)
            .map(|s| s.yield_multiplier)
            .unwrap_or(1.0);
        let satellite = input.satellite_factor.unwrap_or(1.0);

        let base_yield = crop.avg_yield_per_hectare;
        let predicted = base_yield * soil * weather * state * satellite;
        let category = classify_yield(predicted / base_yield);

        let mut confidence = 70.0 + soil * 10.0 + weather * 10.0;
        if satellite != 1.0 {
            confidence += 5.0;
        }
        let confidence = confidence.clamp(0.0, MAX_CONFIDENCE);

        Ok(YieldPrediction {
            crop: crop.display_name(),
            predicted_yield: round_to(predicted, 2),
            total_yield: round_to(predicted * input.area_hectares, 2),
            unit: "kg/hectare".to_string(),
            base_yield,
            confidence: round_to(confidence, 1),
            category,
            factors: YieldFactors {
                soil_factor: round_to(soil, 2),
                weather_factor: round_to(weather, 2),
                state_factor: round_to(state, 2),
                satellite_factor: input.satellite_factor.map(|f| round_to(f, 3)),
            },
            insights: insights(crop, input, soil, weather, state),
            recommendations: recommendations(crop, input, category),
        })
    }
}

// ============================================================================
// Factor functions
// ============================================================================

fn nutrient_ratio(actual: f64, optimal: f64) -> f64 {
    if optimal == 0.0 {
        1.0
    } else {
        (actual / optimal).min(MAX_NUTRIENT_RATIO)
    }
}

/// Weighted NPK ratio scaled by the pH factor
pub fn soil_factor(crop: &CropProfile, nitrogen: f64, phosphorus: f64, potassium: f64, ph: f64) -> f64 {
    let n = nutrient_ratio(nitrogen, crop.optimal_nitrogen);
    let p = nutrient_ratio(phosphorus, crop.optimal_phosphorus);
    let k = nutrient_ratio(potassium, crop.optimal_potassium);

    (n * 0.4 + p * 0.3 + k * 0.3) * ph_factor(&crop.ph_range, ph)
}

/// 1.0 inside the band, minus 0.1 per pH unit outside, floored at 0.7
pub fn ph_factor(range: &PhRange, ph: f64) -> f64 {
    (1.0 - range.distance(ph) * 0.1).max(0.7)
}

pub fn weather_factor(water_need: WaterLevel, rainfall_mm: f64, temperature: f64, humidity: f64) -> f64 {
    rainfall_factor(water_need, rainfall_mm) * 0.4
        + temperature_factor(temperature) * 0.35
        + humidity_factor(humidity) * 0.25
}

/// Rainfall relative to the water-need optimum.
///
/// Exactly 1.0 at the optimum, rising to 1.2 for wetter seasons up to 1.5x,
/// falling towards 0.5 when dry and 0.6 when flooded.
pub fn rainfall_factor(water_need: WaterLevel, rainfall_mm: f64) -> f64 {
    let ratio = rainfall_mm / water_need.optimal_rainfall_mm();

    if ratio < 0.5 {
        (ratio * 1.5).max(0.5)
    } else if ratio <= 1.5 {
        (0.8 + ratio * 0.2).min(1.2)
    } else {
        (1.1 - (ratio - 1.5) * 0.5).max(0.6)
    }
}

/// 1.0 in 20-30 °C, minus 0.03 per degree outside, floored at 0.6
pub fn temperature_factor(temperature: f64) -> f64 {
    let deviation = if temperature < 20.0 {
        20.0 - temperature
    } else if temperature > 30.0 {
        temperature - 30.0
    } else {
        0.0
    };
    (1.0 - deviation * 0.03).max(0.6)
}

/// 1.0 in 60-80 %, otherwise minus 0.005 per point away from 70, floored at 0.8
pub fn humidity_factor(humidity: f64) -> f64 {
    if (60.0..=80.0).contains(&humidity) {
        1.0
    } else {
        (1.0 - (humidity - 70.0).abs() * 0.005).max(0.8)
    }
}

// ============================================================================
// Advisory text
// ============================================================================

fn insights(crop: &CropProfile, input: &YieldInput, soil: f64, weather: f64, state: f64) -> Vec<String> {
    let mut insights = Vec::new();
    let name = crop.display_name();

    if soil < 0.9 {
        insights.push("⚠️ Soil nutrients are below optimal. Consider soil testing and balanced fertilization.".to_string());
    } else if soil > 1.1 {
        insights.push(format!("✅ Excellent soil conditions for {}", name));
    }

    if weather < 0.9 {
        insights.push("⚠️ Weather conditions are not ideal this season".to_string());
    } else if weather > 1.05 {
        insights.push(format!("✅ Favourable weather conditions for {}", name));
    }

    if state > 1.1 {
        insights.push(format!("✅ {} is a leading producer region", input.state.trim()));
    } else if state < 0.9 {
        insights.push(format!(
            "⚠️ Yields in {} are typically below the national average",
            input.state.trim()
        ));
    }

    let nutrients = [
        ("Nitrogen", input.nitrogen, crop.optimal_nitrogen),
        ("Phosphorus", input.phosphorus, crop.optimal_phosphorus),
        ("Potassium", input.potassium, crop.optimal_potassium),
    ];
    for (nutrient, actual, optimal) in nutrients {
        if actual < optimal * LOW_NUTRIENT_SHARE {
            insights.push(format!(
                "💡 {} is low. Recommended: {} kg/ha",
                nutrient, optimal
            ));
        }
    }

    insights
}

fn recommendations(crop: &CropProfile, input: &YieldInput, category: YieldCategory) -> Vec<String> {
    let mut recommendations = match category {
        YieldCategory::Low => vec![
            "Improve soil health with organic compost and a soil amendment plan".to_string(),
            "Consult the local agriculture extension officer before sowing".to_string(),
        ],
        YieldCategory::Medium => vec![
            "Follow a split-dose fertilizer schedule to lift yields".to_string(),
        ],
        YieldCategory::High => vec![
            "Conditions are good. Maintain current practices".to_string(),
        ],
    };

    if crop.water_need == WaterLevel::High && input.rainfall_mm < IRRIGATION_RAINFALL_MM {
        recommendations.push(
            "Rainfall is low for this crop. Plan drip or sprinkler irrigation".to_string(),
        );
    }

    if input.ph < crop.ph_range.min {
        recommendations.push("Soil is acidic. Apply agricultural lime to raise pH".to_string());
    } else if input.ph > crop.ph_range.max {
        recommendations.push(
            "Soil is alkaline. Add gypsum, sulfur or organic matter to lower pH".to_string(),
        );
    }

    recommendations.push("Call the Kisan Call Centre (1800-180-1551) for expert advice".to_string());
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictor() -> RuleBasedPredictor {
        RuleBasedPredictor::new(Arc::new(ReferenceData::builtin()))
    }

    fn rice_in_punjab() -> YieldInput {
        YieldInput {
            crop: "rice".to_string(),
            state: "Punjab".to_string(),
            nitrogen: 120.0,
            phosphorus: 60.0,
            potassium: 40.0,
            ph: 6.2,
            rainfall_mm: 1200.0,
            temperature_celsius: 25.0,
            humidity_percent: 70.0,
            area_hectares: 1.0,
            satellite_factor: None,
        }
    }

    #[test]
    fn test_optimal_rice_in_punjab() {
        let prediction = predictor().predict(&rice_in_punjab()).unwrap();

        assert!((prediction.factors.soil_factor - 1.0).abs() < 1e-9);
        assert!((prediction.factors.weather_factor - 1.0).abs() < 1e-9);
        assert!((prediction.factors.state_factor - 1.25).abs() < 1e-9);
        assert!((prediction.predicted_yield - 3125.0).abs() < 0.01);
        assert_eq!(prediction.category, YieldCategory::High);
        assert!((prediction.confidence - 90.0).abs() < 1e-9);
        assert!(prediction.factors.satellite_factor.is_none());
    }

    #[test]
    fn test_unknown_crop() {
        let mut input = rice_in_punjab();
        input.crop = "durian".to_string();
        assert_eq!(
            predictor().predict(&input),
            Err(AdvisoryError::CropNotFound("durian".to_string()))
        );
    }

    #[test]
    fn test_unknown_state_defaults_to_neutral() {
        let mut input = rice_in_punjab();
        input.state = "Atlantis".to_string();
        let prediction = predictor().predict(&input).unwrap();
        assert!((prediction.factors.state_factor - 1.0).abs() < 1e-9);
        assert_eq!(prediction.category, YieldCategory::Medium);
    }

    #[test]
    fn test_satellite_factor_adds_confidence() {
        let mut input = rice_in_punjab();
        input.satellite_factor = Some(1.1);
        let prediction = predictor().predict(&input).unwrap();
        assert!((prediction.confidence - 95.0).abs() < 1e-9);
        assert!((prediction.predicted_yield - 3437.5).abs() < 0.01);
    }

    #[test]
    fn test_low_nutrients_produce_insights() {
        let mut input = rice_in_punjab();
        input.nitrogen = 50.0;
        input.potassium = 10.0;
        let prediction = predictor().predict(&input).unwrap();
        let low: Vec<_> = prediction
            .insights
            .iter()
            .filter(|i| i.starts_with("💡"))
            .collect();
        assert_eq!(low.len(), 2);
    }

    #[test]
    fn test_ph_factor_floor() {
        let range = PhRange::new(6.0, 7.0);
        assert_eq!(ph_factor(&range, 6.0), 1.0);
        assert_eq!(ph_factor(&range, 7.0), 1.0);
        assert!((ph_factor(&range, 7.5) - 0.95).abs() < 1e-9);
        assert!((ph_factor(&range, 2.0) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_rainfall_factor_shape() {
        assert!((rainfall_factor(WaterLevel::High, 1200.0) - 1.0).abs() < 1e-9);
        assert!((rainfall_factor(WaterLevel::Medium, 1200.0) - 1.1).abs() < 1e-9);
        assert!((rainfall_factor(WaterLevel::Low, 0.0) - 0.5).abs() < 1e-9);
        assert!((rainfall_factor(WaterLevel::Low, 4000.0) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_and_humidity_factors() {
        assert_eq!(temperature_factor(25.0), 1.0);
        assert!((temperature_factor(35.0) - 0.85).abs() < 1e-9);
        assert!((temperature_factor(-20.0) - 0.6).abs() < 1e-9);
        assert_eq!(humidity_factor(75.0), 1.0);
        assert!((humidity_factor(40.0) - 0.85).abs() < 1e-9);
        assert!((humidity_factor(0.0) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_dry_acidic_rice_recommendations() {
        let mut input = rice_in_punjab();
        input.rainfall_mm = 500.0;
        input.ph = 4.8;
        let prediction = predictor().predict(&input).unwrap();
        assert!(prediction
            .recommendations
            .iter()
            .any(|r| r.contains("irrigation")));
        assert!(prediction.recommendations.iter().any(|r| r.contains("lime")));
        assert!(prediction
            .recommendations
            .last()
            .is_some_and(|r| r.contains("Kisan Call Centre")));
    }
}
