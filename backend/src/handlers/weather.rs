//! HTTP handlers for weather endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::weather::{StateWeatherResponse, WeatherAlertsResponse};
use crate::AppState;

/// Current weather and farming advice for a state
pub async fn get_state_weather(
    State(state): State<AppState>,
    Path(state_name): Path<String>,
) -> AppResult<Json<StateWeatherResponse>> {
    let report = state.weather_service().state_report(&state_name).await?;
    Ok(Json(report))
}

/// Severe weather alerts for a state
pub async fn get_weather_alerts(
    State(state): State<AppState>,
    Path(state_name): Path<String>,
) -> AppResult<Json<WeatherAlertsResponse>> {
    let alerts = state.weather_service().state_alerts(&state_name).await?;
    Ok(Json(alerts))
}
