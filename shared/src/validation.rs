//! Validation utilities for advisory requests
//!
//! The scorer and predictor assume validated inputs; these checks run in the
//! caller layer before a query is built.

use rust_decimal::Decimal;

// ============================================================================
// Soil and Weather Validations
// ============================================================================

/// Validate soil pH is on the 0-14 scale
pub fn validate_ph(ph: f64) -> Result<(), &'static str> {
    if !ph.is_finite() || !(0.0..=14.0).contains(&ph) {
        return Err("Soil pH must be between 0 and 14");
    }
    Ok(())
}

/// Validate a soil nutrient level in kg/hectare
pub fn validate_nutrient(amount: f64) -> Result<(), &'static str> {
    if !amount.is_finite() || amount < 0.0 {
        return Err("Nutrient levels cannot be negative");
    }
    Ok(())
}

pub fn validate_rainfall(rainfall_mm: f64) -> Result<(), &'static str> {
    if !rainfall_mm.is_finite() || rainfall_mm < 0.0 {
        return Err("Rainfall cannot be negative");
    }
    Ok(())
}

/// Validate air temperature is physically plausible for Indian farmland
pub fn validate_temperature(celsius: f64) -> Result<(), &'static str> {
    if !celsius.is_finite() || !(-30.0..=60.0).contains(&celsius) {
        return Err("Temperature must be between -30 and 60 °C");
    }
    Ok(())
}

pub fn validate_humidity(percent: f64) -> Result<(), &'static str> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err("Humidity must be between 0 and 100%");
    }
    Ok(())
}

// ============================================================================
// Farm Validations
// ============================================================================

/// Validate cultivated area in hectares
pub fn validate_area(hectares: f64) -> Result<(), &'static str> {
    if !hectares.is_finite() || hectares <= 0.0 {
        return Err("Area must be greater than zero");
    }
    Ok(())
}

/// Largest farm size accepted, in hectares
pub const MAX_FARM_SIZE_HECTARES: i64 = 1_000_000;
/// Largest budget accepted, in rupees
pub const MAX_BUDGET_RUPEES: i64 = 10_000_000_000_000;

pub fn validate_farm_size(hectares: Decimal) -> Result<(), &'static str> {
    if hectares <= Decimal::ZERO {
        return Err("Farm size must be greater than zero");
    }
    if hectares > Decimal::from(MAX_FARM_SIZE_HECTARES) {
        return Err("Farm size must be at most 1,000,000 hectares");
    }
    Ok(())
}

/// Validate budget in rupees
pub fn validate_budget(budget: Decimal) -> Result<(), &'static str> {
    if budget < Decimal::ZERO {
        return Err("Budget cannot be negative");
    }
    if budget > Decimal::from(MAX_BUDGET_RUPEES) {
        return Err("Budget is too large");
    }
    Ok(())
}

/// Validate a free-text name such as a state, crop or soil label
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty");
    }
    if name.len() > 64 {
        return Err("Name must be at most 64 characters");
    }
    Ok(())
}
