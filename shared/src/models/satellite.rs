//! Satellite (NASA POWER) summaries and the yield factor derived from them

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::round_to;

/// NASA POWER parameters requested for agricultural use
pub const POWER_PARAMETERS: [&str; 10] = [
    "T2M",               // Temperature at 2 meters (°C)
    "T2M_MAX",           // Maximum temperature (°C)
    "T2M_MIN",           // Minimum temperature (°C)
    "RH2M",              // Relative humidity (%)
    "PRECTOTCORR",       // Precipitation (mm/day)
    "ALLSKY_SFC_SW_DWN", // Solar radiation (MJ/m²/day)
    "GWETROOT",          // Root zone soil wetness (0-1)
    "GWETPROF",          // Profile soil wetness (0-1)
    "EVPTRNS",           // Evapotranspiration (mm/day)
    "WS2M",              // Wind speed (m/s)
];

/// Fill value NASA POWER uses for missing samples
pub const POWER_FILL_VALUE: f64 = -999.0;

/// Days between today and the most recent day NASA POWER reliably has data for
const POWER_LATENCY_DAYS: i64 = 7;

/// Start and end dates of a lookback window ending before the data latency gap
pub fn power_date_window(today: NaiveDate, lookback_days: i64) -> (NaiveDate, NaiveDate) {
    let end = today - Duration::days(POWER_LATENCY_DAYS);
    let start = today - Duration::days(lookback_days + POWER_LATENCY_DAYS);
    (start, end)
}

/// Aggregate of one parameter over the lookback window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ParameterStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl ParameterStats {
    /// Aggregate valid samples, skipping the fill value. None when nothing is valid.
    pub fn from_samples<I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let valid: Vec<f64> = samples
            .into_iter()
            .filter(|v| v.is_finite() && *v != POWER_FILL_VALUE)
            .collect();
        if valid.is_empty() {
            return None;
        }

        let sum: f64 = valid.iter().sum();
        let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
        let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            average: round_to(sum / valid.len() as f64, 2),
            min: round_to(min, 2),
            max: round_to(max, 2),
        })
    }
}

/// Soil wetness classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SoilCondition {
    Waterlogged,
    Adequate,
    Moderate,
    Dry,
    #[serde(rename = "Very Dry")]
    VeryDry,
}

impl std::fmt::Display for SoilCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilCondition::Waterlogged => write!(f, "Waterlogged"),
            SoilCondition::Adequate => write!(f, "Adequate"),
            SoilCondition::Moderate => write!(f, "Moderate"),
            SoilCondition::Dry => write!(f, "Dry"),
            SoilCondition::VeryDry => write!(f, "Very Dry"),
        }
    }
}

/// Classify a 0-1 soil moisture index
pub fn classify_soil_moisture(index: f64) -> SoilCondition {
    if index >= 0.8 {
        SoilCondition::Waterlogged
    } else if index >= 0.6 {
        SoilCondition::Adequate
    } else if index >= 0.4 {
        SoilCondition::Moderate
    } else if index >= 0.2 {
        SoilCondition::Dry
    } else {
        SoilCondition::VeryDry
    }
}

/// Satellite readings for a location, aggregated over the lookback window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SatelliteSummary {
    pub soil_moisture_index: f64,
    pub soil_condition: SoilCondition,
    /// Per-parameter aggregates keyed by NASA POWER parameter name
    pub parameters: BTreeMap<String, ParameterStats>,
}

impl SatelliteSummary {
    /// Build a summary from raw `parameter -> (date -> value)` series
    pub fn from_parameter_series(raw: &BTreeMap<String, BTreeMap<String, f64>>) -> Self {
        let parameters: BTreeMap<String, ParameterStats> = raw
            .iter()
            .filter_map(|(name, series)| {
                ParameterStats::from_samples(series.values().copied())
                    .map(|stats| (name.clone(), stats))
            })
            .collect();

        let root = parameters.get("GWETROOT").map(|s| s.average).unwrap_or(0.5);
        let profile = parameters.get("GWETPROF").map(|s| s.average).unwrap_or(0.5);
        let soil_moisture_index = round_to(root * 0.6 + profile * 0.4, 3);

        Self {
            soil_moisture_index,
            soil_condition: classify_soil_moisture(soil_moisture_index),
            parameters,
        }
    }

    pub fn average(&self, parameter: &str) -> Option<f64> {
        self.parameters.get(parameter).map(|s| s.average)
    }

    pub fn temperature_avg(&self) -> Option<f64> {
        self.average("T2M")
    }

    pub fn humidity_avg(&self) -> Option<f64> {
        self.average("RH2M")
    }

    pub fn precipitation_avg(&self) -> Option<f64> {
        self.average("PRECTOTCORR")
    }

    pub fn solar_radiation_avg(&self) -> Option<f64> {
        self.average("ALLSKY_SFC_SW_DWN")
    }
}

/// Yield multiplier derived from satellite readings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SatelliteFactor {
    pub factor: f64,
    pub insights: Vec<String>,
}

/// Combine soil moisture, temperature and solar radiation into one multiplier.
///
/// The result is the mean of three sub-factors, each in [0.7, 1.1].
pub fn satellite_yield_factor(summary: &SatelliteSummary) -> SatelliteFactor {
    let mut insights = Vec::new();

    let moisture = summary.soil_moisture_index;
    let moisture_factor = if (0.4..=0.7).contains(&moisture) {
        insights.push(format!(
            "🛰️ Satellite: soil moisture ({:.2}) is optimal",
            moisture
        ));
        1.1
    } else if moisture < 0.2 {
        insights.push(format!(
            "🛰️ Satellite: soil very dry ({:.2}) - needs irrigation",
            moisture
        ));
        0.7
    } else if moisture > 0.8 {
        insights.push(format!(
            "🛰️ Satellite: soil waterlogged ({:.2}) - needs drainage",
            moisture
        ));
        0.8
    } else {
        0.9
    };

    let temperature = summary.temperature_avg().unwrap_or(25.0);
    let temperature_factor = if (20.0..=30.0).contains(&temperature) {
        insights.push(format!(
            "🛰️ Satellite: temperature ({:.1}°C) is ideal",
            temperature
        ));
        1.1
    } else if !(15.0..=38.0).contains(&temperature) {
        0.7
    } else {
        0.95
    };

    let solar = summary.solar_radiation_avg().unwrap_or(18.0);
    let solar_factor = if (15.0..=22.0).contains(&solar) {
        insights.push(format!(
            "🛰️ Satellite: solar radiation ({:.1} MJ/m²) is excellent",
            solar
        ));
        1.1
    } else if solar < 10.0 {
        0.8
    } else {
        1.0
    };

    SatelliteFactor {
        factor: round_to((moisture_factor + temperature_factor + solar_factor) / 3.0, 3),
        insights,
    }
}
