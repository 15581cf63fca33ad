//! State and soil reference models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::GpsCoordinates;

/// Regional profile of an Indian state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateProfile {
    pub name: String,
    /// City whose coordinates are used for weather and satellite lookups
    pub city: String,
    pub location: GpsCoordinates,
    /// Regional yield adjustment, e.g. Punjab = 1.25
    pub yield_multiplier: f64,
    /// Crop id -> preference weight in [0.8, 1.5]
    #[serde(default)]
    pub crop_preference_weights: BTreeMap<String, f64>,
}

impl StateProfile {
    /// Preference weight for a crop, if the state lists one
    pub fn preference_weight(&self, crop_id: &str) -> Option<f64> {
        self.crop_preference_weights.get(crop_id).copied()
    }
}

/// Soil labels a farmer's soil is considered compatible with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilCompatibility {
    pub soil_type: String,
    pub compatible_with: Vec<String>,
}
