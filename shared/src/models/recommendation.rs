//! Crop recommendation output models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{RiskLevel, Season, WaterLevel};

/// Suitability label derived from a score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Suitability {
    /// 80+ points
    Excellent,
    /// 60-79 points
    Good,
    /// 40-59 points
    Fair,
    /// Below 40 points
    Poor,
}

impl std::fmt::Display for Suitability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Suitability::Excellent => write!(f, "Excellent"),
            Suitability::Good => write!(f, "Good"),
            Suitability::Fair => write!(f, "Fair"),
            Suitability::Poor => write!(f, "Poor"),
        }
    }
}

/// Classify a 0-100 suitability score
pub fn classify_suitability(score: i32) -> Suitability {
    if score >= 80 {
        Suitability::Excellent
    } else if score >= 60 {
        Suitability::Good
    } else if score >= 40 {
        Suitability::Fair
    } else {
        Suitability::Poor
    }
}

/// The scoring branch a contribution came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Regional,
    Season,
    Soil,
    Water,
    Ph,
    Budget,
    Risk,
    Temperature,
    Humidity,
}

/// Tone of a reason string
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Caution,
    Negative,
}

impl Polarity {
    /// Positive for gains, Caution for small losses, Negative for larger ones
    pub fn from_delta(delta: i32) -> Self {
        if delta > 0 {
            Polarity::Positive
        } else if delta >= -5 {
            Polarity::Caution
        } else {
            Polarity::Negative
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Polarity::Positive => "✅",
            Polarity::Caution => "⚠️",
            Polarity::Negative => "❌",
        }
    }
}

/// One evaluated scoring branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreContribution {
    pub factor: ScoreFactor,
    pub delta: i32,
    pub polarity: Polarity,
    pub reason: String,
}

impl ScoreContribution {
    pub fn new(factor: ScoreFactor, delta: i32, message: impl AsRef<str>) -> Self {
        let polarity = Polarity::from_delta(delta);
        Self {
            factor,
            delta,
            polarity,
            reason: format!("{} {}", polarity.marker(), message.as_ref()),
        }
    }
}

/// Full scoring trace for one crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub crop: String,
    pub score: i32,
    pub contributions: Vec<ScoreContribution>,
}

impl ScoreBreakdown {
    /// Reasons in evaluation order
    pub fn reasons(&self) -> Vec<String> {
        self.contributions.iter().map(|c| c.reason.clone()).collect()
    }

    pub fn suitability(&self) -> Suitability {
        classify_suitability(self.score)
    }
}

/// Financial projection for a recommended crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Financials {
    pub investment_per_ha: Decimal,
    pub expected_revenue_per_ha: Decimal,
    pub expected_profit_per_ha: Decimal,
    pub roi_percent: Decimal,
    pub total_investment: Decimal,
    pub total_expected_revenue: Decimal,
    pub total_expected_profit: Decimal,
}

/// Agronomic details of a recommended crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropDetails {
    pub duration_days: u32,
    pub water_need: WaterLevel,
    pub risk_level: RiskLevel,
    pub best_seasons: Vec<Season>,
}

/// A crop recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCrop {
    pub crop: String,
    pub score: i32,
    pub suitability: Suitability,
    pub reasons: Vec<String>,
    pub financials: Financials,
    pub details: CropDetails,
}
