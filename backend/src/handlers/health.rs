//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub predictor: String,
    pub crops: usize,
    pub states: usize,
    pub live_weather: bool,
    pub satellite_data: bool,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        predictor: state.predictor.name().to_string(),
        crops: state.reference.crops.len(),
        states: state.reference.states.len(),
        live_weather: state.weather_client.is_some(),
        satellite_data: state.satellite_client.is_some(),
    })
}
