//! Yield prediction output models

use serde::{Deserialize, Serialize};

/// Yield category relative to the crop's base yield
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum YieldCategory {
    /// 110%+ of base yield
    High,
    /// 90-110% of base yield
    Medium,
    /// Below 90% of base yield
    Low,
}

impl std::fmt::Display for YieldCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YieldCategory::High => write!(f, "High"),
            YieldCategory::Medium => write!(f, "Medium"),
            YieldCategory::Low => write!(f, "Low"),
        }
    }
}

/// Classify predicted yield by its ratio to the base yield
pub fn classify_yield(ratio: f64) -> YieldCategory {
    if ratio >= 1.1 {
        YieldCategory::High
    } else if ratio >= 0.9 {
        YieldCategory::Medium
    } else {
        YieldCategory::Low
    }
}

/// Multiplicative factors behind a prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldFactors {
    pub soil_factor: f64,
    pub weather_factor: f64,
    pub state_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satellite_factor: Option<f64>,
}

/// A yield prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldPrediction {
    pub crop: String,
    /// kg/hectare
    pub predicted_yield: f64,
    /// kg over the whole area
    pub total_yield: f64,
    pub unit: String,
    pub base_yield: f64,
    pub confidence: f64,
    pub category: YieldCategory,
    pub factors: YieldFactors,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}
