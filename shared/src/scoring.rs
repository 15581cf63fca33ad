//! Crop suitability scoring
//!
//! An additive point scorer: every crop starts from a low base so that a
//! regional or seasonal mismatch alone can push it below the inclusion
//! threshold. Each evaluated branch records a [`ScoreContribution`] whose
//! reason string carries the same sign as its delta.

use rust_decimal::Decimal;

use crate::models::{
    classify_suitability, CropDetails, CropProfile, FarmerQuery, Financials, ScoreBreakdown,
    ScoreContribution, ScoreFactor, ScoredCrop,
};
use crate::reference::ReferenceData;
use crate::types::{RiskLevel, RiskPreference, WaterLevel};

/// Starting score for every crop
pub const BASE_SCORE: i32 = 40;
/// Crops scoring below this are not recommended
pub const INCLUSION_THRESHOLD: i32 = 40;
/// Maximum number of recommendations returned
pub const MAX_RECOMMENDATIONS: usize = 5;
/// Preference weight assumed when a state lists none for a crop
pub const DEFAULT_PREFERENCE_WEIGHT: f64 = 0.8;

const LESS_COMMON_PENALTY: i32 = -5;
const PH_TOLERANCE: f64 = 0.5;

/// Scores crops against a farmer's query using shared reference tables
#[derive(Debug, Clone, Copy)]
pub struct CropScorer<'a> {
    reference: &'a ReferenceData,
}

impl<'a> CropScorer<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Score a single crop.
    ///
    /// Never fails: an unknown state falls back to the default preference
    /// weight and an unknown soil label is only compatible with itself.
    pub fn score(&self, crop: &CropProfile, query: &FarmerQuery) -> ScoreBreakdown {
        let mut contributions = Vec::with_capacity(9);

        contributions.push(self.regional(crop, query));
        contributions.push(season_fit(crop, query));
        contributions.push(self.soil_fit(crop, query));
        contributions.push(water_fit(crop.water_need, query.water_availability));
        contributions.push(ph_fit(crop, query.ph));

        // A zero budget counts as no budget
        if let Some(budget) = query.budget.filter(|b| !b.is_zero()) {
            contributions.push(budget_fit(crop, budget, query.farm_size_hectares));
        }
        if let Some(preference) = query.risk_preference {
            contributions.extend(risk_fit(crop.risk_level, preference));
        }
        if let Some(weather) = query.live_weather {
            contributions.extend(temperature_fit(crop.water_need, weather.temperature_celsius));
            contributions.extend(humidity_fit(crop.water_need, weather.humidity_percent));
        }

        let raw: i32 = BASE_SCORE + contributions.iter().map(|c| c.delta).sum::<i32>();

        ScoreBreakdown {
            crop: crop.display_name(),
            score: raw.clamp(0, 100),
            contributions,
        }
    }

    /// Recommend up to five crops, best first.
    ///
    /// Crops below the inclusion threshold are dropped. Ties keep the
    /// reference table order.
    pub fn recommend(&self, query: &FarmerQuery) -> Vec<ScoredCrop> {
        let mut scored: Vec<(&CropProfile, ScoreBreakdown)> = self
            .reference
            .crops
            .iter()
            .map(|crop| (crop, self.score(crop, query)))
            .filter(|(_, breakdown)| breakdown.score >= INCLUSION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.1.score.cmp(&a.1.score));

        scored
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|(crop, breakdown)| ScoredCrop {
                crop: breakdown.crop.clone(),
                score: breakdown.score,
                suitability: classify_suitability(breakdown.score),
                reasons: breakdown.reasons(),
                financials: financials(crop, query.farm_size_hectares),
                details: CropDetails {
                    duration_days: crop.duration_days,
                    water_need: crop.water_need,
                    risk_level: crop.risk_level,
                    best_seasons: crop.seasons.clone(),
                },
            })
            .collect()
    }

    fn regional(&self, crop: &CropProfile, query: &FarmerQuery) -> ScoreContribution {
        let state = self.reference.state(&query.state);
        let weight = state
            .and_then(|s| s.preference_weight(&crop.id))
            .unwrap_or(DEFAULT_PREFERENCE_WEIGHT);
        let state_name = state.map(|s| s.name.as_str()).unwrap_or(query.state.as_str());

        if weight < 1.0 {
            ScoreContribution::new(
                ScoreFactor::Regional,
                LESS_COMMON_PENALTY,
                format!("Less common in {}", state_name),
            )
        } else {
            let bonus = regional_bonus(weight);
            ScoreContribution::new(
                ScoreFactor::Regional,
                bonus,
                format!("Major crop in {} (+{} regional bonus)", state_name, bonus),
            )
        }
    }

    fn soil_fit(&self, crop: &CropProfile, query: &FarmerQuery) -> ScoreContribution {
        let acceptable = self.reference.acceptable_soils(&query.soil_type);
        let compatible = crop.soil_types.iter().any(|soil| {
            acceptable
                .iter()
                .any(|ok| ok.eq_ignore_ascii_case(soil))
        });

        if compatible {
            ScoreContribution::new(
                ScoreFactor::Soil,
                15,
                format!("{} soil is suitable", query.soil_type),
            )
        } else {
            ScoreContribution::new(
                ScoreFactor::Soil,
                -10,
                format!(
                    "{} soil is not ideal (prefers {})",
                    query.soil_type,
                    crop.soil_types.join(", ")
                ),
            )
        }
    }
}

/// Regional bonus `floor((weight - 0.8) * 50)`.
///
/// The epsilon keeps weights like 0.9 or 1.4, which are not exact in
/// binary, from flooring one point short.
pub fn regional_bonus(weight: f64) -> i32 {
    ((weight - DEFAULT_PREFERENCE_WEIGHT) * 50.0 + 1e-9).floor() as i32
}

fn season_fit(crop: &CropProfile, query: &FarmerQuery) -> ScoreContribution {
    if crop.grows_in(query.season) {
        ScoreContribution::new(
            ScoreFactor::Season,
            20,
            format!("Perfect for {} season", query.season),
        )
    } else {
        ScoreContribution::new(
            ScoreFactor::Season,
            -20,
            format!(
                "Not a {} crop (grown in {})",
                query.season,
                crop.season_list()
            ),
        )
    }
}

/// Water sufficiency: enough water, one level short, or badly short
pub fn water_fit(need: WaterLevel, availability: WaterLevel) -> ScoreContribution {
    let shortfall = need.ordinal() - availability.ordinal();
    match shortfall {
        s if s <= 0 => ScoreContribution::new(
            ScoreFactor::Water,
            15,
            format!("{} water availability matches requirement", availability),
        ),
        1 => ScoreContribution::new(
            ScoreFactor::Water,
            5,
            "May need extra irrigation",
        ),
        _ => ScoreContribution::new(
            ScoreFactor::Water,
            -15,
            format!("Needs {} water, only {} available", need, availability),
        ),
    }
}

fn ph_fit(crop: &CropProfile, ph: f64) -> ScoreContribution {
    let range = crop.ph_range;
    if range.contains(ph) {
        ScoreContribution::new(ScoreFactor::Ph, 10, format!("Soil pH {:.1} is optimal", ph))
    } else if range.distance(ph) <= PH_TOLERANCE {
        ScoreContribution::new(
            ScoreFactor::Ph,
            3,
            format!("Soil pH {:.1} is acceptable", ph),
        )
    } else {
        ScoreContribution::new(
            ScoreFactor::Ph,
            -8,
            format!(
                "Soil pH {:.1} outside optimal range {:.1}-{:.1}",
                ph, range.min, range.max
            ),
        )
    }
}

fn budget_fit(crop: &CropProfile, budget: Decimal, farm_size: Decimal) -> ScoreContribution {
    let required = crop.investment_per_hectare;
    // Overflow means the budget dwarfs any investment
    let budget_per_ha = budget
        .checked_div(farm_size.max(Decimal::new(1, 1)))
        .unwrap_or(Decimal::MAX);

    if budget_per_ha >= required {
        ScoreContribution::new(ScoreFactor::Budget, 10, "Within your budget")
    } else if budget_per_ha >= required * Decimal::new(7, 1) {
        ScoreContribution::new(ScoreFactor::Budget, 5, "Slightly above budget")
    } else {
        ScoreContribution::new(
            ScoreFactor::Budget,
            -5,
            format!("Needs ₹{} per hectare", required),
        )
    }
}

fn risk_fit(crop_risk: RiskLevel, preference: RiskPreference) -> Option<ScoreContribution> {
    (preference == RiskPreference::Low && crop_risk == RiskLevel::High).then(|| {
        ScoreContribution::new(
            ScoreFactor::Risk,
            -10,
            "High risk crop for a low risk preference",
        )
    })
}

fn temperature_fit(need: WaterLevel, temperature: f64) -> Option<ScoreContribution> {
    if temperature > 35.0 && need == WaterLevel::High {
        Some(ScoreContribution::new(
            ScoreFactor::Temperature,
            -5,
            format!("High temperature ({:.0}°C) increases water demand", temperature),
        ))
    } else if temperature < 15.0 && need == WaterLevel::Low {
        Some(ScoreContribution::new(
            ScoreFactor::Temperature,
            -5,
            format!("Cold weather ({:.0}°C) slows growth", temperature),
        ))
    } else if (20.0..=30.0).contains(&temperature) {
        Some(ScoreContribution::new(
            ScoreFactor::Temperature,
            5,
            format!("Current temperature ({:.0}°C) is favourable", temperature),
        ))
    } else {
        None
    }
}

fn humidity_fit(need: WaterLevel, humidity: f64) -> Option<ScoreContribution> {
    if humidity > 85.0 && need == WaterLevel::Low {
        Some(ScoreContribution::new(
            ScoreFactor::Humidity,
            -5,
            format!("High humidity ({:.0}%) raises fungal disease risk", humidity),
        ))
    } else if humidity < 40.0 && need == WaterLevel::High {
        Some(ScoreContribution::new(
            ScoreFactor::Humidity,
            -5,
            format!("Low humidity ({:.0}%) means more irrigation", humidity),
        ))
    } else {
        None
    }
}

/// Per-hectare and farm-wide financial projection
pub fn financials(crop: &CropProfile, farm_size: Decimal) -> Financials {
    let investment = crop.investment_per_hectare;
    let revenue = crop.expected_revenue_per_hectare;
    let profit = revenue - investment;
    let roi_percent = profit
        .checked_div(investment)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|roi| roi.round_dp(1))
        .unwrap_or(Decimal::ZERO);

    Financials {
        investment_per_ha: investment,
        expected_revenue_per_ha: revenue,
        expected_profit_per_ha: profit,
        roi_percent,
        total_investment: saturating_scale(investment, farm_size),
        total_expected_revenue: saturating_scale(revenue, farm_size),
        total_expected_profit: saturating_scale(profit, farm_size),
    }
}

fn saturating_scale(per_hectare: Decimal, farm_size: Decimal) -> Decimal {
    per_hectare.checked_mul(farm_size).unwrap_or_else(|| {
        if per_hectare.is_sign_negative() != farm_size.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}
