//! Static reference tables: crops, states and soil compatibility
//!
//! Tables are built (or loaded) once at startup, validated, and then shared
//! read-only between the scorer and the predictor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::ReferenceDataError;
use crate::models::{CropProfile, PhRange, SoilCompatibility, StateProfile};
use crate::types::{GpsCoordinates, RiskLevel, Season, WaterLevel};

/// Lowest allowed crop preference weight (also the default when a state lists none)
pub const MIN_PREFERENCE_WEIGHT: f64 = 0.8;
/// Highest allowed crop preference weight
pub const MAX_PREFERENCE_WEIGHT: f64 = 1.5;

/// The complete set of reference tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Crops in recommendation tie-break order
    pub crops: Vec<CropProfile>,
    pub states: Vec<StateProfile>,
    pub soil_compatibility: Vec<SoilCompatibility>,
}

impl ReferenceData {
    /// Parse and validate tables from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ReferenceDataError> {
        let data: ReferenceData = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Read, parse and validate tables from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ReferenceDataError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Look up a crop by name, ignoring case and surrounding whitespace
    pub fn crop(&self, name: &str) -> Option<&CropProfile> {
        let name = name.trim();
        self.crops.iter().find(|c| c.id.eq_ignore_ascii_case(name))
    }

    /// Look up a state by name, ignoring case and surrounding whitespace
    pub fn state(&self, name: &str) -> Option<&StateProfile> {
        let name = name.trim();
        self.states.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Soil labels compatible with the given soil.
    ///
    /// An unknown label is only compatible with itself.
    pub fn acceptable_soils(&self, soil_type: &str) -> Vec<String> {
        let soil_type = soil_type.trim();
        self.soil_compatibility
            .iter()
            .find(|entry| entry.soil_type.eq_ignore_ascii_case(soil_type))
            .map(|entry| entry.compatible_with.clone())
            .unwrap_or_else(|| vec![soil_type.to_string()])
    }

    pub fn crop_names(&self) -> Vec<&str> {
        self.crops.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn state_names(&self) -> Vec<&str> {
        self.states.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn soil_types(&self) -> Vec<&str> {
        self.soil_compatibility
            .iter()
            .map(|s| s.soil_type.as_str())
            .collect()
    }

    /// Check internal consistency of the tables
    pub fn validate(&self) -> Result<(), ReferenceDataError> {
        let mut crop_ids = HashSet::new();
        for crop in &self.crops {
            let invalid = |message: &str| ReferenceDataError::InvalidCrop {
                crop: crop.id.clone(),
                message: message.to_string(),
            };

            if crop.id != crop.id.trim().to_lowercase() {
                return Err(invalid("id must be lowercase without surrounding spaces"));
            }
            if !crop_ids.insert(crop.id.as_str()) {
                return Err(ReferenceDataError::Duplicate {
                    kind: "crop",
                    name: crop.id.clone(),
                });
            }
            if crop.seasons.is_empty() {
                return Err(invalid("at least one season is required"));
            }
            if crop.soil_types.is_empty() {
                return Err(invalid("at least one soil type is required"));
            }
            if crop.ph_range.min > crop.ph_range.max {
                return Err(invalid("ph_range.min must not exceed ph_range.max"));
            }
            if crop.avg_yield_per_hectare <= 0.0 {
                return Err(invalid("avg_yield_per_hectare must be positive"));
            }
            if crop.optimal_nitrogen < 0.0
                || crop.optimal_phosphorus < 0.0
                || crop.optimal_potassium < 0.0
            {
                return Err(invalid("optimal nutrient levels must not be negative"));
            }
            if crop.investment_per_hectare <= Decimal::ZERO {
                return Err(invalid("investment_per_hectare must be positive"));
            }
        }

        let mut state_names = HashSet::new();
        for state in &self.states {
            let invalid = |message: String| ReferenceDataError::InvalidState {
                state: state.name.clone(),
                message,
            };

            if !state_names.insert(state.name.to_lowercase()) {
                return Err(ReferenceDataError::Duplicate {
                    kind: "state",
                    name: state.name.clone(),
                });
            }
            if state.yield_multiplier <= 0.0 {
                return Err(invalid("yield_multiplier must be positive".to_string()));
            }
            for (crop, weight) in &state.crop_preference_weights {
                // Keys are matched exactly against crop ids when scoring
                if !crop_ids.contains(crop.as_str()) {
                    return Err(invalid(format!("preference weight for unknown crop {}", crop)));
                }
                if !(MIN_PREFERENCE_WEIGHT..=MAX_PREFERENCE_WEIGHT).contains(weight) {
                    return Err(invalid(format!(
                        "preference weight {} for {} is outside [{}, {}]",
                        weight, crop, MIN_PREFERENCE_WEIGHT, MAX_PREFERENCE_WEIGHT
                    )));
                }
            }
        }

        let mut soils = HashSet::new();
        for entry in &self.soil_compatibility {
            if !soils.insert(entry.soil_type.to_lowercase()) {
                return Err(ReferenceDataError::Duplicate {
                    kind: "soil type",
                    name: entry.soil_type.clone(),
                });
            }
        }

        Ok(())
    }

    /// The built-in tables
    pub fn builtin() -> Self {
        Self {
            crops: builtin_crops(),
            states: builtin_states(),
            soil_compatibility: builtin_soil_compatibility(),
        }
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// Built-in tables
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn crop(
    id: &str,
    seasons: &[Season],
    water_need: WaterLevel,
    soil_types: &[&str],
    ph: (f64, f64),
    economics: (i64, i64),
    duration_days: u32,
    risk_level: RiskLevel,
    avg_yield: f64,
    npk: (f64, f64, f64),
) -> CropProfile {
    CropProfile {
        id: id.to_string(),
        seasons: seasons.to_vec(),
        water_need,
        soil_types: soil_types.iter().map(|s| s.to_string()).collect(),
        ph_range: PhRange::new(ph.0, ph.1),
        investment_per_hectare: Decimal::from(economics.0),
        expected_revenue_per_hectare: Decimal::from(economics.1),
        duration_days,
        risk_level,
        avg_yield_per_hectare: avg_yield,
        optimal_nitrogen: npk.0,
        optimal_phosphorus: npk.1,
        optimal_potassium: npk.2,
    }
}

fn builtin_crops() -> Vec<CropProfile> {
    use RiskLevel as R;
    use Season::*;
    use WaterLevel as W;

    vec![
        crop("rice", &[Kharif], W::High, &["Clay", "Loamy", "Alluvial"], (5.5, 7.0), (45_000, 75_000), 120, R::Low, 2500.0, (120.0, 60.0, 40.0)),
        crop("wheat", &[Rabi], W::Medium, &["Loamy", "Clay", "Alluvial"], (6.0, 7.5), (35_000, 65_000), 130, R::Low, 3200.0, (120.0, 60.0, 40.0)),
        crop("maize", &[Kharif, Rabi], W::Medium, &["Loamy", "Sandy Loam", "Alluvial"], (5.8, 7.0), (30_000, 55_000), 100, R::Medium, 2800.0, (150.0, 75.0, 50.0)),
        crop("cotton", &[Kharif], W::Medium, &["Black", "Alluvial", "Loamy"], (6.0, 8.0), (50_000, 90_000), 180, R::Medium, 500.0, (100.0, 50.0, 50.0)),
        crop("sugarcane", &[Kharif, Rabi], W::High, &["Loamy", "Clay", "Alluvial"], (6.0, 7.5), (80_000, 180_000), 365, R::Low, 70000.0, (250.0, 100.0, 120.0)),
        crop("soybean", &[Kharif], W::Medium, &["Loamy", "Clay", "Black"], (6.0, 7.0), (25_000, 50_000), 100, R::Medium, 1200.0, (25.0, 60.0, 40.0)),
        crop("groundnut", &[Kharif, Rabi], W::Low, &["Sandy", "Sandy Loam", "Red"], (6.0, 6.5), (35_000, 70_000), 120, R::Medium, 1500.0, (20.0, 40.0, 50.0)),
        crop("potato", &[Rabi], W::High, &["Sandy Loam", "Loamy", "Alluvial"], (5.5, 6.5), (100_000, 200_000), 90, R::High, 22000.0, (180.0, 100.0, 150.0)),
        crop("tomato", &[Kharif, Rabi, Zaid], W::High, &["Loamy", "Sandy Loam", "Red"], (6.0, 7.0), (150_000, 350_000), 90, R::High, 25000.0, (150.0, 80.0, 100.0)),
        crop("onion", &[Kharif, Rabi], W::Medium, &["Loamy", "Sandy Loam", "Alluvial"], (6.0, 7.0), (80_000, 180_000), 120, R::High, 18000.0, (100.0, 50.0, 80.0)),
        crop("mustard", &[Rabi], W::Low, &["Loamy", "Sandy Loam", "Alluvial"], (6.0, 7.5), (20_000, 45_000), 120, R::Low, 1200.0, (80.0, 40.0, 40.0)),
        crop("chickpea", &[Rabi], W::Low, &["Loamy", "Sandy Loam", "Black"], (6.0, 8.0), (25_000, 55_000), 110, R::Low, 1000.0, (20.0, 50.0, 20.0)),
        crop("bajra", &[Kharif], W::Low, &["Sandy", "Sandy Loam", "Loamy"], (6.5, 7.5), (15_000, 35_000), 80, R::Low, 1200.0, (60.0, 30.0, 30.0)),
        crop("jowar", &[Kharif, Rabi], W::Low, &["Black", "Loamy", "Red"], (6.0, 7.5), (18_000, 38_000), 100, R::Low, 1100.0, (80.0, 40.0, 40.0)),
    ]
}

fn state(
    name: &str,
    city: &str,
    lat: f64,
    lon: f64,
    yield_multiplier: f64,
    weights: &[(&str, f64)],
) -> StateProfile {
    StateProfile {
        name: name.to_string(),
        city: city.to_string(),
        location: GpsCoordinates::new(lat, lon),
        yield_multiplier,
        crop_preference_weights: weights
            .iter()
            .map(|(crop, weight)| (crop.to_string(), *weight))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn builtin_states() -> Vec<StateProfile> {
    vec![
        state("Punjab", "Chandigarh", 30.7333, 76.7794, 1.25, &[("wheat", 1.4), ("rice", 1.3), ("cotton", 1.1), ("potato", 1.1), ("maize", 1.0), ("mustard", 1.0)]),
        state("Haryana", "Chandigarh", 30.7333, 76.7794, 1.20, &[("wheat", 1.35), ("mustard", 1.3), ("rice", 1.2), ("bajra", 1.1), ("cotton", 1.1), ("sugarcane", 1.0)]),
        state("Uttar Pradesh", "Lucknow", 26.8467, 80.9462, 1.10, &[("sugarcane", 1.4), ("wheat", 1.3), ("potato", 1.3), ("rice", 1.15), ("mustard", 1.0)]),
        state("West Bengal", "Kolkata", 22.5726, 88.3639, 1.15, &[("rice", 1.4), ("potato", 1.3), ("mustard", 1.0)]),
        state("Andhra Pradesh", "Visakhapatnam", 17.6868, 83.2185, 1.10, &[("rice", 1.3), ("groundnut", 1.2), ("cotton", 1.15), ("tomato", 1.1), ("maize", 1.0)]),
        state("Tamil Nadu", "Chennai", 13.0827, 80.2707, 1.05, &[("rice", 1.3), ("sugarcane", 1.2), ("groundnut", 1.15), ("cotton", 1.0)]),
        state("Karnataka", "Bangalore", 12.9716, 77.5946, 1.00, &[("maize", 1.25), ("jowar", 1.2), ("groundnut", 1.1), ("sugarcane", 1.1), ("tomato", 1.1), ("onion", 1.1)]),
        state("Maharashtra", "Mumbai", 19.0760, 72.8777, 0.95, &[("cotton", 1.35), ("onion", 1.35), ("soybean", 1.3), ("sugarcane", 1.3), ("jowar", 1.25)]),
        state("Madhya Pradesh", "Bhopal", 23.2599, 77.4126, 0.95, &[("soybean", 1.45), ("chickpea", 1.4), ("wheat", 1.25), ("maize", 1.0), ("mustard", 1.0)]),
        state("Gujarat", "Ahmedabad", 23.0225, 72.5714, 1.05, &[("cotton", 1.4), ("groundnut", 1.4), ("bajra", 1.1), ("onion", 1.0)]),
        state("Rajasthan", "Jaipur", 26.9124, 75.7873, 0.85, &[("bajra", 1.45), ("mustard", 1.45), ("chickpea", 1.2), ("groundnut", 1.0), ("jowar", 1.0)]),
        state("Bihar", "Patna", 25.5941, 85.1376, 1.00, &[("maize", 1.25), ("rice", 1.2), ("wheat", 1.2), ("potato", 1.1)]),
        state("Odisha", "Bhubaneswar", 20.2961, 85.8245, 0.95, &[("rice", 1.35), ("groundnut", 1.0)]),
        state("Assam", "Guwahati", 26.1445, 91.7362, 0.90, &[("rice", 1.4), ("mustard", 1.0), ("potato", 0.9)]),
        state("Jharkhand", "Ranchi", 23.3441, 85.3096, 0.85, &[("rice", 1.25), ("maize", 1.0)]),
        state("Chhattisgarh", "Raipur", 21.2514, 81.6296, 0.90, &[("rice", 1.45), ("soybean", 0.9)]),
        state("Kerala", "Kochi", 9.9312, 76.2673, 1.00, &[("rice", 1.0), ("tomato", 0.9)]),
        state("Telangana", "Hyderabad", 17.3850, 78.4867, 1.05, &[("cotton", 1.35), ("rice", 1.3), ("maize", 1.2), ("soybean", 1.0)]),
    ]
}

fn builtin_soil_compatibility() -> Vec<SoilCompatibility> {
    let entry = |soil: &str, compatible: &[&str]| SoilCompatibility {
        soil_type: soil.to_string(),
        compatible_with: compatible.iter().map(|s| s.to_string()).collect(),
    };

    vec![
        entry("Clay", &["Clay", "Black", "Alluvial"]),
        entry("Loamy", &["Loamy", "Sandy Loam", "Alluvial"]),
        entry("Sandy", &["Sandy", "Sandy Loam"]),
        entry("Sandy Loam", &["Sandy Loam", "Loamy", "Sandy"]),
        entry("Alluvial", &["Alluvial", "Loamy", "Clay"]),
        entry("Black", &["Black", "Clay"]),
        entry("Red", &["Red", "Sandy Loam", "Laterite"]),
        entry("Laterite", &["Laterite", "Red"]),
    ]
}
