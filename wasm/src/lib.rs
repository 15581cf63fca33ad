//! WebAssembly module for the Agri Advisor platform
//!
//! Runs the suitability scorer and yield predictor in the browser against the
//! built-in reference tables, so field workers can get advice offline:
//! - Crop recommendations
//! - Yield predictions
//! - Financial projections
//! - Label classification helpers

use std::sync::{Arc, OnceLock};

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use shared::scoring::financials;
use shared::{
    classify_soil_moisture, classify_suitability, CropScorer, FarmerQuery, ReferenceData,
    RuleBasedPredictor, YieldInput, YieldPredictor,
};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn reference() -> &'static Arc<ReferenceData> {
    static REFERENCE: OnceLock<Arc<ReferenceData>> = OnceLock::new();
    REFERENCE.get_or_init(|| Arc::new(ReferenceData::builtin()))
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str(&format!(
        "Agri Advisor WASM ready: {} crops, {} states",
        reference().crops.len(),
        reference().states.len()
    )));
}

/// Rank crops for a farmer query given as JSON
#[wasm_bindgen]
pub fn recommend_crops(query_json: &str) -> Result<String, JsValue> {
    recommend_json(query_json).map_err(|e| JsValue::from_str(&e))
}

/// Predict yield for an input given as JSON
#[wasm_bindgen]
pub fn predict_crop_yield(input_json: &str) -> Result<String, JsValue> {
    predict_json(input_json).map_err(|e| JsValue::from_str(&e))
}

/// Farm-wide financial projection for a crop
#[wasm_bindgen]
pub fn estimate_financials(crop: &str, farm_size_hectares: f64) -> Result<String, JsValue> {
    financials_json(crop, farm_size_hectares).map_err(|e| JsValue::from_str(&e))
}

/// Suitability label for a 0-100 score
#[wasm_bindgen]
pub fn classify_suitability_label(score: i32) -> String {
    classify_suitability(score).to_string()
}

/// Soil condition label for a 0-1 moisture index
#[wasm_bindgen]
pub fn soil_moisture_condition(index: f64) -> String {
    classify_soil_moisture(index).to_string()
}

/// Crop identifiers in the reference tables
#[wasm_bindgen]
pub fn list_crops() -> js_sys::Array {
    reference()
        .crop_names()
        .into_iter()
        .map(JsValue::from_str)
        .collect()
}

fn recommend_json(query_json: &str) -> Result<String, String> {
    let query: FarmerQuery =
        serde_json::from_str(query_json).map_err(|e| format!("Invalid query JSON: {}", e))?;
    validate_name(&query.state)?;
    validate_name(&query.soil_type)?;
    validate_ph(query.ph)?;
    validate_farm_size(query.farm_size_hectares)?;
    if let Some(budget) = query.budget {
        validate_budget(budget)?;
    }
    if let Some(weather) = query.live_weather {
        validate_temperature(weather.temperature_celsius)?;
        validate_humidity(weather.humidity_percent)?;
    }

    let recommendations = CropScorer::new(reference()).recommend(&query);
    serde_json::to_string(&recommendations).map_err(|e| e.to_string())
}

fn predict_json(input_json: &str) -> Result<String, String> {
    let input: YieldInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid input JSON: {}", e))?;
    validate_yield_input(&input)?;

    let prediction = RuleBasedPredictor::new(reference().clone())
        .predict(&input)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&prediction).map_err(|e| e.to_string())
}

fn validate_yield_input(input: &YieldInput) -> Result<(), &'static str> {
    validate_name(&input.crop)?;
    validate_name(&input.state)?;
    validate_nutrient(input.nitrogen)?;
    validate_nutrient(input.phosphorus)?;
    validate_nutrient(input.potassium)?;
    validate_ph(input.ph)?;
    validate_rainfall(input.rainfall_mm)?;
    validate_temperature(input.temperature_celsius)?;
    validate_humidity(input.humidity_percent)?;
    validate_area(input.area_hectares)
}

fn financials_json(crop: &str, farm_size_hectares: f64) -> Result<String, String> {
    let farm_size = Decimal::try_from(farm_size_hectares)
        .map_err(|_| "Farm size must be a finite number".to_string())?;
    validate_farm_size(farm_size)?;

    let profile = reference()
        .crop(crop)
        .ok_or_else(|| format!("Crop not found: {}", crop.trim()))?;
    serde_json::to_string(&financials(profile, farm_size)).map_err(|e| e.to_string())
}
