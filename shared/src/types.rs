//! Common enums and value types used across the platform

use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Indian cropping seasons
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Season {
    /// Monsoon-sown (June - October)
    Kharif,
    /// Winter-sown (October - March)
    Rabi,
    /// Summer-sown (March - June)
    Zaid,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Zaid];
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Kharif => write!(f, "Kharif"),
            Season::Rabi => write!(f, "Rabi"),
            Season::Zaid => write!(f, "Zaid"),
        }
    }
}

/// Water requirement of a crop or water availability of a farm
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WaterLevel {
    Low,
    Medium,
    High,
}

impl WaterLevel {
    pub const ALL: [WaterLevel; 3] = [WaterLevel::Low, WaterLevel::Medium, WaterLevel::High];

    /// Ordinal used for sufficiency comparisons (Low=1, Medium=2, High=3)
    pub fn ordinal(&self) -> i32 {
        match self {
            WaterLevel::Low => 1,
            WaterLevel::Medium => 2,
            WaterLevel::High => 3,
        }
    }

    /// Annualized rainfall (mm) at which a crop with this need yields best
    pub fn optimal_rainfall_mm(&self) -> f64 {
        match self {
            WaterLevel::High => 1200.0,
            WaterLevel::Medium => 800.0,
            WaterLevel::Low => 400.0,
        }
    }
}

impl std::fmt::Display for WaterLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaterLevel::Low => write!(f, "Low"),
            WaterLevel::Medium => write!(f, "Medium"),
            WaterLevel::High => write!(f, "High"),
        }
    }
}

/// Market/agronomic risk of a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Farmer's appetite for risk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskPreference {
    Low,
    Medium,
    High,
}

/// Soil labels understood by the compatibility table
pub const SOIL_TYPES: [&str; 8] = [
    "Clay",
    "Loamy",
    "Sandy",
    "Sandy Loam",
    "Alluvial",
    "Black",
    "Red",
    "Laterite",
];

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
