//! Crop recommendation tests
//!
//! Unit scenarios and property-based tests for the suitability scorer:
//! - Score clamp
//! - One reason per contribution, with matching polarity
//! - Determinism
//! - Water sufficiency monotonicity
//! - pH band boundaries

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::scoring::{regional_bonus, water_fit, BASE_SCORE, INCLUSION_THRESHOLD, MAX_RECOMMENDATIONS};
use shared::{
    CropScorer, FarmerQuery, LiveWeather, Polarity, ReferenceData, RiskPreference, ScoreFactor,
    Season, WaterLevel, SOIL_TYPES,
};

fn query(state: &str, season: Season, soil: &str, water: WaterLevel, ph: f64) -> FarmerQuery {
    FarmerQuery {
        state: state.to_string(),
        season,
        soil_type: soil.to_string(),
        water_availability: water,
        ph,
        budget: None,
        farm_size_hectares: Decimal::ONE,
        risk_preference: None,
        live_weather: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Punjab wheat in Rabi on loamy soil is a top recommendation
    #[test]
    fn test_punjab_wheat_scenario() {
        let data = ReferenceData::builtin();
        let scorer = CropScorer::new(&data);
        let mut q = query("Punjab", Season::Rabi, "Loamy", WaterLevel::High, 6.8);
        q.budget = Some(Decimal::from(200_000));
        q.farm_size_hectares = Decimal::from(5);

        let recommendations = scorer.recommend(&q);
        let wheat = recommendations
            .iter()
            .find(|c| c.crop == "Wheat")
            .expect("wheat in top five");
        assert!(wheat.score >= 80);
        assert_eq!(recommendations[0].crop, "Wheat");
    }

    /// Rice out of season in Kerala on unsuitable soil is excluded
    #[test]
    fn test_kerala_rice_out_of_season() {
        let data = ReferenceData::builtin();
        let scorer = CropScorer::new(&data);
        let q = query("Kerala", Season::Rabi, "Sandy", WaterLevel::Low, 6.2);

        let rice = data.crop("rice").unwrap();
        let breakdown = scorer.score(rice, &q);
        assert!(breakdown.score < INCLUSION_THRESHOLD);

        let season = breakdown
            .contributions
            .iter()
            .find(|c| c.factor == ScoreFactor::Season)
            .unwrap();
        assert_eq!(season.delta, -20);
        assert_eq!(season.polarity, Polarity::Negative);

        let recommendations = scorer.recommend(&q);
        assert!(recommendations.iter().all(|c| c.crop != "Rice"));
    }

    /// Regional bonus is the first contribution and anchors state differences
    #[test]
    fn test_regional_bonus_differs_by_state() {
        let data = ReferenceData::builtin();
        let scorer = CropScorer::new(&data);
        let wheat = data.crop("wheat").unwrap();

        let punjab = scorer.score(wheat, &query("Punjab", Season::Kharif, "Clay", WaterLevel::Low, 5.0));
        let kerala = scorer.score(wheat, &query("Kerala", Season::Kharif, "Clay", WaterLevel::Low, 5.0));

        assert_eq!(punjab.contributions[0].factor, ScoreFactor::Regional);
        assert_eq!(punjab.contributions[0].delta, 30);
        assert_eq!(kerala.contributions[0].delta, -5);
        assert_eq!(punjab.score - kerala.score, 35);
    }

    /// A preference weight below 1.0 marks the crop as less common
    #[test]
    fn test_minor_preference_weight_penalised() {
        let data = ReferenceData::builtin();
        let scorer = CropScorer::new(&data);
        let potato = data.crop("potato").unwrap();

        // Assam lists potato at 0.9, Uttar Pradesh at 1.3
        let assam = scorer.score(potato, &query("Assam", Season::Kharif, "Loamy", WaterLevel::High, 6.0));
        let up = scorer.score(potato, &query("Uttar Pradesh", Season::Kharif, "Loamy", WaterLevel::High, 6.0));

        assert_eq!(assam.contributions[0].delta, -5);
        assert_eq!(assam.contributions[0].reason, "⚠️ Less common in Assam");
        assert_eq!(up.contributions[0].delta, 25);
        assert_eq!(up.score - assam.score, 30);
    }

    /// Unknown soil label only matches crops listing exactly that label
    #[test]
    fn test_unknown_soil_singleton() {
        let data = ReferenceData::builtin();
        let scorer = CropScorer::new(&data);
        let q = query("Punjab", Season::Kharif, "Peaty", WaterLevel::High, 6.5);

        for crop in &data.crops {
            let soil = scorer
                .score(crop, &q)
                .contributions
                .into_iter()
                .find(|c| c.factor == ScoreFactor::Soil)
                .unwrap();
            assert_eq!(soil.delta, -10);
        }
    }

    /// Low risk farmers are steered away from high risk crops
    #[test]
    fn test_low_risk_preference_penalty() {
        let data = ReferenceData::builtin();
        let scorer = CropScorer::new(&data);
        let tomato = data.crop("tomato").unwrap();
        let mut q = query("Karnataka", Season::Zaid, "Loamy", WaterLevel::Low, 5.0);

        let neutral = scorer.score(tomato, &q).score;
        q.risk_preference = Some(RiskPreference::Low);
        let averse = scorer.score(tomato, &q);

        assert_eq!(neutral - averse.score, 10);
        assert!(averse
            .contributions
            .iter()
            .any(|c| c.factor == ScoreFactor::Risk && c.polarity == Polarity::Negative));
    }
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn state_strategy() -> impl Strategy<Value = String> {
    let mut names: Vec<String> = ReferenceData::builtin()
        .state_names()
        .into_iter()
        .map(String::from)
        .collect();
    names.push("Atlantis".to_string());
    prop::sample::select(names)
}

fn season_strategy() -> impl Strategy<Value = Season> {
    prop::sample::select(Season::ALL.to_vec())
}

fn water_strategy() -> impl Strategy<Value = WaterLevel> {
    prop::sample::select(WaterLevel::ALL.to_vec())
}

fn soil_strategy() -> impl Strategy<Value = String> {
    let mut soils: Vec<String> = SOIL_TYPES.iter().map(|s| s.to_string()).collect();
    soils.push("Peaty".to_string());
    prop::sample::select(soils)
}

fn risk_strategy() -> impl Strategy<Value = Option<RiskPreference>> {
    prop_oneof![
        Just(None),
        Just(Some(RiskPreference::Low)),
        Just(Some(RiskPreference::Medium)),
        Just(Some(RiskPreference::High)),
    ]
}

fn weather_strategy() -> impl Strategy<Value = Option<LiveWeather>> {
    let temperature = prop_oneof![
        -10.0f64..50.0,
        prop::sample::select(vec![14.9, 15.0, 20.0, 30.0, 35.0, 35.1, 40.0]),
    ];
    let humidity = prop_oneof![
        0.0f64..100.0,
        prop::sample::select(vec![39.9, 40.0, 85.0, 85.1]),
    ];
    prop::option::of((temperature, humidity).prop_map(|(t, h)| LiveWeather {
        temperature_celsius: t,
        humidity_percent: h,
    }))
}

/// A zero budget is treated as no budget
fn has_budget(q: &FarmerQuery) -> bool {
    q.budget.map_or(false, |b| !b.is_zero())
}

/// Expected temperature and humidity deltas for a crop's water need
fn expected_weather_deltas(need: WaterLevel, weather: LiveWeather) -> (Option<i32>, Option<i32>) {
    let t = weather.temperature_celsius;
    let h = weather.humidity_percent;

    let temperature = if t > 35.0 && need == WaterLevel::High {
        Some(-5)
    } else if t < 15.0 && need == WaterLevel::Low {
        Some(-5)
    } else if (20.0..=30.0).contains(&t) {
        Some(5)
    } else {
        None
    };
    let humidity = if (h > 85.0 && need == WaterLevel::Low) || (h < 40.0 && need == WaterLevel::High) {
        Some(-5)
    } else {
        None
    };
    (temperature, humidity)
}

prop_compose! {
    fn query_strategy()(
        state in state_strategy(),
        season in season_strategy(),
        soil_type in soil_strategy(),
        water_availability in water_strategy(),
        ph_tenths in 0u32..=140,
        budget in prop::option::of(0i64..500_000),
        farm_size_tenths in 1i64..500,
        risk_preference in risk_strategy(),
        live_weather in weather_strategy(),
    ) -> FarmerQuery {
        FarmerQuery {
            state,
            season,
            soil_type,
            water_availability,
            ph: f64::from(ph_tenths) / 10.0,
            budget: budget.map(Decimal::from),
            farm_size_hectares: Decimal::new(farm_size_tenths, 1),
            risk_preference,
            live_weather,
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every crop scores within [0, 100]
        #[test]
        fn prop_score_is_clamped(q in query_strategy()) {
            let data = ReferenceData::builtin();
            let scorer = CropScorer::new(&data);
            for crop in &data.crops {
                let score = scorer.score(crop, &q).score;
                prop_assert!((0..=100).contains(&score));
            }
        }

        /// The score is the clamped sum of the base and every contribution
        #[test]
        fn prop_score_tracks_contributions(q in query_strategy()) {
            let data = ReferenceData::builtin();
            let scorer = CropScorer::new(&data);
            for crop in &data.crops {
                let breakdown = scorer.score(crop, &q);
                let raw = BASE_SCORE + breakdown.contributions.iter().map(|c| c.delta).sum::<i32>();
                prop_assert_eq!(breakdown.score, raw.clamp(0, 100));
            }
        }

        /// One reason per evaluated branch, each carrying its delta's polarity
        #[test]
        fn prop_reasons_match_contributions(q in query_strategy()) {
            let data = ReferenceData::builtin();
            let scorer = CropScorer::new(&data);
            for crop in &data.crops {
                let breakdown = scorer.score(crop, &q);
                let reasons = breakdown.reasons();

                prop_assert_eq!(reasons.len(), breakdown.contributions.len());
                let optional = usize::from(has_budget(&q)) + 1 + 2;
                prop_assert!(breakdown.contributions.len() >= 5);
                prop_assert!(breakdown.contributions.len() <= 5 + optional);

                for (reason, contribution) in reasons.iter().zip(&breakdown.contributions) {
                    prop_assert_ne!(contribution.delta, 0);
                    let polarity = Polarity::from_delta(contribution.delta);
                    prop_assert_eq!(contribution.polarity, polarity);
                    prop_assert!(reason.starts_with(polarity.marker()));
                    match polarity {
                        Polarity::Positive => prop_assert!(contribution.delta > 0),
                        Polarity::Caution => prop_assert!((-5..0).contains(&contribution.delta)),
                        Polarity::Negative => prop_assert!(contribution.delta < -5),
                    }
                }
            }
        }

        /// Optional branches appear only when their input is present
        #[test]
        fn prop_optional_branches_follow_inputs(q in query_strategy()) {
            let data = ReferenceData::builtin();
            let scorer = CropScorer::new(&data);
            for crop in &data.crops {
                let breakdown = scorer.score(crop, &q);
                let has = |factor: ScoreFactor| breakdown.contributions.iter().any(|c| c.factor == factor);

                prop_assert_eq!(has(ScoreFactor::Budget), has_budget(&q));
                if q.risk_preference.is_none() {
                    prop_assert!(!has(ScoreFactor::Risk));
                }
                if q.live_weather.is_none() {
                    prop_assert!(!has(ScoreFactor::Temperature));
                    prop_assert!(!has(ScoreFactor::Humidity));
                }
            }
        }

        /// Regional contribution follows the state's preference weight
        #[test]
        fn prop_regional_follows_weight(q in query_strategy()) {
            let data = ReferenceData::builtin();
            let scorer = CropScorer::new(&data);
            for crop in &data.crops {
                let weight = data
                    .state(&q.state)
                    .and_then(|s| s.preference_weight(&crop.id))
                    .unwrap_or(0.8);
                let regional: Vec<i32> = scorer
                    .score(crop, &q)
                    .contributions
                    .iter()
                    .filter(|c| c.factor == ScoreFactor::Regional)
                    .map(|c| c.delta)
                    .collect();

                let expected = if weight < 1.0 { -5 } else { regional_bonus(weight) };
                prop_assert_eq!(regional, vec![expected]);
            }
        }

        /// Live weather deltas follow temperature, humidity and water need
        #[test]
        fn prop_weather_deltas(q in query_strategy(), weather in weather_strategy()) {
            let Some(weather) = weather else { return Ok(()); };
            let q = FarmerQuery { live_weather: Some(weather), ..q };
            let data = ReferenceData::builtin();
            let scorer = CropScorer::new(&data);
            for crop in &data.crops {
                let breakdown = scorer.score(crop, &q);
                let delta = |factor: ScoreFactor| {
                    breakdown.contributions.iter().find(|c| c.factor == factor).map(|c| c.delta)
                };
                let (temperature, humidity) = expected_weather_deltas(crop.water_need, weather);
                prop_assert_eq!(delta(ScoreFactor::Temperature), temperature);
                prop_assert_eq!(delta(ScoreFactor::Humidity), humidity);
            }
        }

        /// Scoring and recommending are pure
        #[test]
        fn prop_scoring_is_deterministic(q in query_strategy()) {
            let data = ReferenceData::builtin();
            let scorer = CropScorer::new(&data);
            for crop in &data.crops {
                prop_assert_eq!(scorer.score(crop, &q), scorer.score(crop, &q));
            }
            prop_assert_eq!(scorer.recommend(&q), scorer.recommend(&q));
        }

        /// Recommendations are capped, thresholded and sorted with stable ties
        #[test]
        fn prop_recommendations_are_ranked(q in query_strategy()) {
            let data = ReferenceData::builtin();
            let scorer = CropScorer::new(&data);
            let recommendations = scorer.recommend(&q);

            prop_assert!(recommendations.len() <= MAX_RECOMMENDATIONS);
            for pair in recommendations.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
                if pair[0].score == pair[1].score {
                    let position = |name: &str| data.crops.iter().position(|c| c.display_name() == name);
                    prop_assert!(position(&pair[0].crop) < position(&pair[1].crop));
                }
            }
            for crop in &recommendations {
                prop_assert!(crop.score >= INCLUSION_THRESHOLD);
                prop_assert_eq!(crop.suitability, shared::classify_suitability(crop.score));
            }
        }

        /// More water never lowers the water sufficiency contribution
        #[test]
        fn prop_water_monotonic(need in water_strategy(), a in water_strategy(), b in water_strategy()) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(water_fit(need, low).delta <= water_fit(need, high).delta);
        }

        /// pH exactly on a band edge scores the optimal branch
        #[test]
        fn prop_ph_band_edges_are_optimal(
            q in query_strategy(),
            crop_index in 0usize..14,
            upper in any::<bool>(),
        ) {
            let data = ReferenceData::builtin();
            let scorer = CropScorer::new(&data);
            let crop = &data.crops[crop_index];
            let ph = if upper { crop.ph_range.max } else { crop.ph_range.min };
            let q = FarmerQuery { ph, ..q };

            let ph_delta = scorer
                .score(crop, &q)
                .contributions
                .iter()
                .find(|c| c.factor == ScoreFactor::Ph)
                .map(|c| c.delta);
            prop_assert_eq!(ph_delta, Some(10));
        }
    }
}
